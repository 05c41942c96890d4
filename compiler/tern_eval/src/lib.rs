//! Tern Eval - the composite-literal and map runtime of Tern.
//!
//! The expression evaluator and statement executor talk to this crate
//! through [`Runtime`]:
//!
//! - composite literals: `build_struct`, `build_array`, `build_map`,
//!   `build_composite`
//! - conversions: `convert`, `convert_constant`
//! - pointers: `alloc`, `load`, `store`, and member addresses through
//!   `field_pointer` and `element_pointer`
//! - maps: `make_map`, `map_get`, `map_get_ok`, `map_set`, `map_delete`,
//!   `map_len`, `is_nil`
//! - the `==` operator: `compare`
//!
//! # Re-exports
//!
//! Value and error types come from `tern_value` and type descriptors from
//! `tern_types`; both are re-exported so embedders need a single import.

mod config;
pub mod literal;
mod runtime;
mod slots;
mod tracing_setup;

pub use config::RuntimeConfig;
pub use literal::{Element, Entry, EntryKey, LiteralBuilder};
pub use runtime::Runtime;
pub use slots::SlotArena;
pub use tracing_setup::init_tracing;

pub use tern_ir::{Name, SharedInterner, StringInterner, StringLookup};
pub use tern_types::{ArrayLen, ArrayType, FieldDef, FloatKind, IntKind, MapType, StructType, Type};
pub use tern_value::equality::{equal, hash_value};
pub use tern_value::{
    AnyValue, ArrayValue, Constant, EvalError, EvalErrorKind, EvalNote, EvalResult, IntValue,
    MapKey, MapState, MapValue, PointerValue, SlotId, StructValue, Value,
};
