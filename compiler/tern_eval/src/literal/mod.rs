//! Composite literal construction.
//!
//! The evaluator hands over a literal as its type plus an ordered list of
//! entries, each an optional key and an element. Elements are coerced to
//! the slot they land in:
//!
//! - a [`Constant`] goes through constant conversion
//! - a [`Value`] must be assignable (boxed when the slot is `any`)
//! - a nested literal with an elided type (`[]Pair{{1, 2}}`) is built with
//!   the slot's type; in a `*T` slot it is built as `T` and allocated
//!
//! | Literal | Keys | Rule |
//! |---------|------|------|
//! | struct | field names | all keyed or all positional |
//! | array | integer indices | cursor, see [`SparseArrayBuilder`] |
//! | map | any key value | every entry keyed |

mod array_lit;
mod map_lit;
mod struct_lit;

use std::sync::Arc;

use tern_ir::{Name, StringLookup};
use tern_stack::ensure_sufficient_stack;
use tern_types::Type;
use tern_value::{invalid_composite_type, Constant, Converter, EvalResult, Value};

use crate::slots::SlotArena;

pub use array_lit::SparseArrayBuilder;

/// One element of a composite literal.
#[derive(Clone, Debug)]
pub enum Element {
    /// An already-evaluated value.
    Value(Value),
    /// An untyped constant.
    Const(Constant),
    /// A nested literal whose type comes from the enclosing slot.
    Nested(Vec<Entry>),
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Element::Value(value)
    }
}

impl From<Constant> for Element {
    fn from(constant: Constant) -> Self {
        Element::Const(constant)
    }
}

/// The key of a keyed literal entry.
#[derive(Clone, Debug)]
pub enum EntryKey {
    /// `field: value` in a struct literal.
    Field(Name),
    /// `index: value` in an array literal.
    Index(i64),
    /// `key: value` in a map literal.
    Key(Element),
}

/// One `key: element` or bare `element` of a literal.
#[derive(Clone, Debug)]
pub struct Entry {
    pub key: Option<EntryKey>,
    pub elem: Element,
}

impl Entry {
    /// A bare element.
    pub fn positional(elem: impl Into<Element>) -> Self {
        Entry {
            key: None,
            elem: elem.into(),
        }
    }

    /// `field: elem`
    pub fn field(name: Name, elem: impl Into<Element>) -> Self {
        Entry {
            key: Some(EntryKey::Field(name)),
            elem: elem.into(),
        }
    }

    /// `index: elem`
    pub fn index(index: i64, elem: impl Into<Element>) -> Self {
        Entry {
            key: Some(EntryKey::Index(index)),
            elem: elem.into(),
        }
    }

    /// `key: elem`
    pub fn keyed(key: impl Into<Element>, elem: impl Into<Element>) -> Self {
        Entry {
            key: Some(EntryKey::Key(key.into())),
            elem: elem.into(),
        }
    }

    /// A nested literal with an elided type.
    pub fn nested(entries: Vec<Entry>) -> Self {
        Entry::positional(Element::Nested(entries))
    }
}

/// Builds struct, array and map values from literal entries.
///
/// Borrows what it needs from a [`crate::Runtime`]: the name table for
/// diagnostics, the converter, the slot arena for `&T{...}` elements and
/// the literal length limit.
pub struct LiteralBuilder<'a> {
    names: &'a dyn StringLookup,
    conv: Converter<'a>,
    slots: &'a SlotArena,
    max_len: usize,
}

impl<'a> LiteralBuilder<'a> {
    pub fn new(
        names: &'a dyn StringLookup,
        conv: Converter<'a>,
        slots: &'a SlotArena,
        max_len: usize,
    ) -> Self {
        LiteralBuilder {
            names,
            conv,
            slots,
            max_len,
        }
    }

    /// Build a literal of any composite type, dispatching on `ty`.
    ///
    /// A pointer type builds its pointee and allocates it, as `&T{...}`.
    pub fn build_composite(&self, ty: &Type, entries: Vec<Entry>) -> EvalResult<Value> {
        match ty {
            Type::Struct(st) => self.build_struct(st, entries).map(Value::Struct),
            Type::Array(arr) => self.build_array(arr, entries).map(Value::Array),
            Type::Map(m) => self.build_map(m, entries).map(Value::Map),
            Type::Pointer(pointee) => {
                let target = self.build_composite(pointee, entries)?;
                Ok(Value::Pointer(self.slots.alloc(target, Arc::clone(pointee))))
            }
            other => Err(invalid_composite_type(&self.type_name(other))),
        }
    }

    /// Coerce one element to the type of the slot it fills.
    fn element(&self, elem: Element, slot: &Type) -> EvalResult<Value> {
        match elem {
            Element::Value(value) => self.conv.assign(value, slot),
            Element::Const(constant) => self.conv.constant(&constant, slot),
            Element::Nested(entries) => {
                ensure_sufficient_stack(|| self.build_composite(slot, entries))
            }
        }
    }

    fn type_name(&self, ty: &Type) -> String {
        ty.display(self.names).to_string()
    }
}

#[cfg(test)]
mod tests;
