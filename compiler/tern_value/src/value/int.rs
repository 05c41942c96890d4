//! Sized integer values.
//!
//! Every integer carries its kind, so a `uint8` and an `int` holding the
//! same number are different values and different map keys. The payload is
//! an `i128`, wide enough for every kind including `uint64`.

use std::fmt;

use tern_types::IntKind;

/// An integer of a specific kind.
///
/// The payload is always within the kind's range: `new` rejects values
/// that do not fit and `wrapping`/`saturating` bring them into range.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct IntValue {
    kind: IntKind,
    value: i128,
}

impl IntValue {
    /// Create an integer, or `None` if `value` does not fit `kind`.
    #[inline]
    pub const fn new(kind: IntKind, value: i128) -> Option<Self> {
        if kind.contains(value) {
            Some(IntValue { kind, value })
        } else {
            None
        }
    }

    /// A plain `int`.
    #[inline]
    pub const fn int(value: i64) -> Self {
        IntValue {
            kind: IntKind::Int,
            value: value as i128,
        }
    }

    /// Zero of the given kind.
    #[inline]
    pub const fn zero(kind: IntKind) -> Self {
        IntValue { kind, value: 0 }
    }

    /// Two's-complement truncation to `kind`'s width.
    pub fn wrapping(kind: IntKind, value: i128) -> Self {
        let bits = kind.bits();
        let mask = (1i128 << bits) - 1;
        let mut truncated = value & mask;
        if kind.is_signed() && truncated > kind.max_value() {
            truncated -= 1i128 << bits;
        }
        IntValue {
            kind,
            value: truncated,
        }
    }

    /// Clamp to `kind`'s range.
    pub fn saturating(kind: IntKind, value: i128) -> Self {
        IntValue {
            kind,
            value: value.clamp(kind.min_value(), kind.max_value()),
        }
    }

    #[inline]
    pub const fn kind(self) -> IntKind {
        self.kind
    }

    #[inline]
    pub const fn as_i128(self) -> i128 {
        self.value
    }

    /// The value as an `i64`, if it fits (it does for every kind except
    /// `uint`, `uint64` and `uintptr` above `i64::MAX`).
    pub fn as_i64(self) -> Option<i64> {
        i64::try_from(self.value).ok()
    }
}

impl fmt::Debug for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.name(), self.value)
    }
}

impl fmt::Display for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests;
