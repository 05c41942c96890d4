//! Tern IR - identifiers shared by every runtime crate.
//!
//! Field names and type names are interned once and then passed around as
//! 32-bit [`Name`] handles. Comparing two names is an integer comparison,
//! which keeps struct layout lookups and type-tag equality cheap.

mod interner;
mod name;

pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
