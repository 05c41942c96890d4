//! Tern Value - the dynamic value model of the Tern runtime.
//!
//! This crate provides:
//! - Runtime values (`Value`, `StructValue`, `ArrayValue`, `PointerValue`,
//!   `AnyValue`, `MapValue`)
//! - Numeric conversion and assignability (`Converter`, `Constant`)
//! - The equality/hash engine used by `==` and by map keys (`equality`)
//! - Evaluation error types (`EvalError`, `EvalErrorKind`, `EvalResult`)
//!
//! # Value semantics
//!
//! Structs and arrays behave as values: cloning one and writing to the clone
//! leaves the original untouched (copy-on-write through `Arc::make_mut`).
//! Maps behave as references: every clone of an initialized map handle
//! observes writes made through any other clone. Pointers carry a slot
//! identity token plus a member path (for `&s.f` and `&a[i]`) and compare
//! by those, never by the pointee's value.

mod convert;
pub mod equality;
mod errors;
mod value;

pub use convert::{Constant, Converter};
pub use errors::{EvalError, EvalErrorKind, EvalNote, EvalResult};
pub use value::{
    AnyValue, ArrayValue, Boxed, Heap, IntValue, MapKey, MapState, MapValue, PointerValue, SlotId,
    StructValue, Value,
};

// Re-export error constructors for use by other crates
pub use errors::{
    array_index_out_of_range, assignment_to_nil_map, cannot_assign, constant_overflows,
    constant_truncated, dangling_pointer, duplicate_field, invalid_composite_type,
    invalid_conversion, invalid_literal_key, literal_too_large, map_comparison, mismatched_types, missing_map_key,
    mixed_struct_literal, negative_array_index, nil_pointer_dereference, not_addressable,
    too_few_struct_values,
    too_many_struct_values, uncomparable_type, unhashable_key, unknown_field,
};
