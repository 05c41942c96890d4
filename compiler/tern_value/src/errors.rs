//! Error types for value construction and map operations.
//!
//! Every fatal condition of the runtime core is reported as an `EvalError`
//! at the point it is detected: during literal construction, conversion,
//! comparison or map assignment. Nothing is deferred to first use.
//!
//! `EvalErrorKind` is the structured category; factory functions (e.g.
//! `assignment_to_nil_map()`) are the public construction API and fill in
//! both `kind` and `message`.

use std::fmt;

use thiserror::Error;

/// Result of a fallible runtime operation.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

/// Typed error category.
///
/// Messages name the violated rule the way the language reports it to the
/// user, e.g. `assignment to entry in nil map`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Map
    #[error("assignment to entry in nil map")]
    NilMapAssignment,
    #[error("unhashable key kind: {type_name}")]
    UnhashableKey { type_name: String },
    #[error("missing key in map literal")]
    MissingMapKey,

    // Struct literal
    #[error("too many values in struct literal of type {type_name} (expected {expected}, got {got})")]
    TooManyStructValues {
        type_name: String,
        expected: usize,
        got: usize,
    },
    #[error("too few values in struct literal of type {type_name} (expected {expected}, got {got})")]
    TooFewStructValues {
        type_name: String,
        expected: usize,
        got: usize,
    },
    #[error("mixture of field:value and value elements in struct literal")]
    MixedStructLiteral,
    #[error("unknown field {field} in struct literal of type {type_name}")]
    UnknownField { field: String, type_name: String },
    #[error("duplicate field name {field} in struct literal")]
    DuplicateField { field: String },
    #[error("invalid key in {type_name} literal")]
    InvalidLiteralKey { type_name: String },
    #[error("invalid composite literal type {type_name}")]
    InvalidCompositeType { type_name: String },

    // Array literal and indexing
    #[error("array index {index} out of range [0:{len}]")]
    ArrayIndexOutOfRange { index: i64, len: usize },
    #[error("array index {index} must be non-negative")]
    NegativeArrayIndex { index: i64 },
    #[error("array literal length {len} exceeds the limit of {limit} elements")]
    LiteralTooLarge { len: u64, limit: usize },

    // Comparison
    #[error("invalid operation: mismatched types {left} and {right}")]
    MismatchedTypes { left: String, right: String },
    #[error("invalid operation: map can only be compared to nil")]
    MapComparison,
    #[error("comparing uncomparable type {type_name}")]
    UncomparableType { type_name: String },

    // Conversion and assignment
    #[error("cannot use {value} as {target} value")]
    CannotAssign { value: String, target: String },
    #[error("constant {value} overflows {target}")]
    ConstantOverflow { value: String, target: String },
    #[error("constant {value} truncated to {target}")]
    ConstantTruncated { value: String, target: String },
    #[error("cannot convert {from} to {to}")]
    InvalidConversion { from: String, to: String },

    // Pointer
    #[error("invalid memory address or nil pointer dereference")]
    NilPointerDereference,
    #[error("invalid pointer: slot {slot} was never allocated")]
    DanglingPointer { slot: u64 },
    #[error("cannot take the address of a member of {type_name}")]
    NotAddressable { type_name: String },

    /// Catch-all for errors without a structured category.
    #[error("{message}")]
    Custom { message: String },
}

/// Additional context attached to an error, such as which literal element
/// was being built when it occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()` for
    /// factory-created errors.
    pub message: String,
    /// Context notes, innermost first.
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }

    /// The message followed by its notes, one per line.
    pub fn render(&self) -> String {
        RenderedError(self).to_string()
    }
}

struct RenderedError<'a>(&'a EvalError);

impl fmt::Display for RenderedError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.message)?;
        for note in &self.0.notes {
            write!(f, "\n  note: {}", note.message)?;
        }
        Ok(())
    }
}

// Map Errors

/// Write to an uninitialized map.
#[cold]
pub fn assignment_to_nil_map() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NilMapAssignment)
}

/// Map key of a kind that has no hash (map, array).
#[cold]
pub fn unhashable_key(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnhashableKey {
        type_name: type_name.to_string(),
    })
}

/// Map literal entry without a key.
#[cold]
pub fn missing_map_key() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingMapKey)
}

// Struct Literal Errors

/// Positional struct literal with more values than fields.
#[cold]
pub fn too_many_struct_values(type_name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyStructValues {
        type_name: type_name.to_string(),
        expected,
        got,
    })
}

/// Positional struct literal with fewer values than fields.
#[cold]
pub fn too_few_struct_values(type_name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooFewStructValues {
        type_name: type_name.to_string(),
        expected,
        got,
    })
}

/// Struct literal mixing keyed and positional entries.
#[cold]
pub fn mixed_struct_literal() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MixedStructLiteral)
}

/// Keyed struct literal naming a field the type does not declare.
#[cold]
pub fn unknown_field(field: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownField {
        field: field.to_string(),
        type_name: type_name.to_string(),
    })
}

/// Keyed struct literal naming the same field twice.
#[cold]
pub fn duplicate_field(field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateField {
        field: field.to_string(),
    })
}

/// Literal key of the wrong shape (field name on an array, index on a struct).
#[cold]
pub fn invalid_literal_key(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidLiteralKey {
        type_name: type_name.to_string(),
    })
}

/// Nested literal whose slot type is not a struct, array, map or pointer to one.
#[cold]
pub fn invalid_composite_type(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidCompositeType {
        type_name: type_name.to_string(),
    })
}

// Array Errors

/// Index at or past an array's length.
#[cold]
pub fn array_index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArrayIndexOutOfRange { index, len })
}

/// Negative explicit index in an array literal.
#[cold]
pub fn negative_array_index(index: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeArrayIndex { index })
}

/// Sparse literal whose length exceeds the configured limit.
#[cold]
pub fn literal_too_large(len: u64, limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LiteralTooLarge { len, limit })
}

// Comparison Errors

/// `==` between values of different types.
#[cold]
pub fn mismatched_types(left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MismatchedTypes {
        left: left.to_string(),
        right: right.to_string(),
    })
}

/// `==` between two maps.
#[cold]
pub fn map_comparison() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MapComparison)
}

/// `==` reaching a map inside a struct, array or `any`.
#[cold]
pub fn uncomparable_type(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UncomparableType {
        type_name: type_name.to_string(),
    })
}

// Conversion Errors

/// Value not assignable to the target type.
#[cold]
pub fn cannot_assign(value: &str, target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotAssign {
        value: value.to_string(),
        target: target.to_string(),
    })
}

/// Integer constant outside the target's range.
#[cold]
pub fn constant_overflows(value: &str, target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantOverflow {
        value: value.to_string(),
        target: target.to_string(),
    })
}

/// Non-integral float constant assigned to an integer type.
#[cold]
pub fn constant_truncated(value: &str, target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantTruncated {
        value: value.to_string(),
        target: target.to_string(),
    })
}

/// Explicit conversion between unrelated types.
#[cold]
pub fn invalid_conversion(from: &str, to: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConversion {
        from: from.to_string(),
        to: to.to_string(),
    })
}

// Pointer Errors

/// Load or store through a nil pointer.
#[cold]
pub fn nil_pointer_dereference() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NilPointerDereference)
}

/// Pointer whose slot token does not belong to the arena.
#[cold]
pub fn dangling_pointer(slot: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DanglingPointer { slot })
}

/// `&p.f` or `&p[i]` where `*p` is not a struct or array.
#[cold]
pub fn not_addressable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAddressable {
        type_name: type_name.to_string(),
    })
}

#[cfg(test)]
mod tests;
