//! Runtime type descriptors for Tern.
//!
//! The evaluator hands these descriptors to the literal constructor and the
//! map container. They describe what a value must look like: the zero value
//! of a type, the field order of a struct, the declared length of an array
//! and the key/value types of a map all come from here.
//!
//! All descriptors are `Clone + Eq + Hash`. Hashing a `Type` is what gives
//! `any` values their dynamic-type tag.

mod composite;
mod kind;
mod ty;

pub use composite::{ArrayLen, ArrayType, FieldDef, MapType, StructType};
pub use kind::{FloatKind, IntKind};
pub use ty::{Type, TypeDisplay};
