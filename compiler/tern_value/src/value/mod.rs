//! Runtime values.
//!
//! # Heap Discipline
//!
//! String payloads and boxed `any` values live behind `Heap<T>`, whose
//! constructor is private to this module. Code outside goes through the
//! factory methods on `Value`:
//!
//! ```text
//! let s = Value::string("hello");              // OK
//! let a = Value::boxed(Type::INT, Value::int(1)); // OK
//! let s = Value::Str(Heap::new(...));          // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Sharing
//!
//! Structs and arrays are copy-on-write: cloning a `Value` is cheap and
//! writes through one clone never show up in another. Maps are handles to
//! a shared table, and pointers are slot tokens, so clones of either alias
//! the same storage.

mod composite;
mod heap;
mod int;
mod map;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tern_ir::StringLookup;
use tern_stack::ensure_sufficient_stack;
use tern_types::{ArrayLen, FloatKind, Type};

pub use composite::{AnyValue, ArrayValue, Boxed, PointerValue, SlotId, StructValue};
pub use heap::Heap;
pub use int::IntValue;
pub use map::{MapKey, MapState, MapValue};

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// The untyped `nil` literal, before it is assigned a type.
    Nil,
    Bool(bool),
    Int(IntValue),
    Float32(f32),
    Float64(f64),
    Str(Heap<String>),
    Pointer(PointerValue),
    Struct(StructValue),
    Array(ArrayValue),
    Any(AnyValue),
    Map(MapValue),
}

// Factory Methods

impl Value {
    /// A plain `int`.
    #[inline]
    pub const fn int(n: i64) -> Self {
        Value::Int(IntValue::int(n))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Box `value` into an `any` tagged with `tag`.
    ///
    /// Callers pass the value's dynamic type; [`crate::Converter::assign`]
    /// does this for any value headed into an `any` slot.
    pub fn boxed(tag: Type, value: Value) -> Self {
        Value::Any(AnyValue::boxed(tag, value))
    }

    /// The zero value of `ty`.
    pub fn zero(ty: &Type) -> Self {
        ensure_sufficient_stack(|| match ty {
            Type::Bool => Value::Bool(false),
            Type::Int(kind) => Value::Int(IntValue::zero(*kind)),
            Type::Float(FloatKind::F32) => Value::Float32(0.0),
            Type::Float(FloatKind::F64) => Value::Float64(0.0),
            Type::Str => Value::string(""),
            Type::Any => Value::Any(AnyValue::nil()),
            Type::Pointer(pointee) => Value::Pointer(PointerValue::nil(Arc::clone(pointee))),
            Type::Struct(st) => Value::Struct(StructValue::zeroed(Arc::clone(st))),
            Type::Array(arr) => {
                let elems = match arr.len {
                    ArrayLen::Fixed(n) => (0..n).map(|_| Value::zero(&arr.elem)).collect(),
                    ArrayLen::Inferred => Vec::new(),
                };
                Value::Array(ArrayValue::from_elems(Arc::clone(arr), elems))
            }
            Type::Map(m) => Value::Map(MapValue::nil(Arc::clone(m))),
        })
    }
}

// Inspection

impl Value {
    /// The value's type, or `None` for untyped `nil`.
    ///
    /// An `any` reports `Type::Any`; its boxed value's type is the tag.
    pub fn dynamic_type(&self) -> Option<Type> {
        Some(match self {
            Value::Nil => return None,
            Value::Bool(_) => Type::Bool,
            Value::Int(i) => Type::Int(i.kind()),
            Value::Float32(_) => Type::FLOAT32,
            Value::Float64(_) => Type::FLOAT64,
            Value::Str(_) => Type::Str,
            Value::Pointer(p) => Type::Pointer(Arc::clone(p.pointee())),
            Value::Struct(s) => Type::Struct(Arc::clone(s.ty())),
            Value::Array(a) => Type::Array(Arc::clone(a.ty())),
            Value::Any(_) => Type::Any,
            Value::Map(m) => Type::Map(Arc::clone(m.ty())),
        })
    }

    /// Category name, without resolving struct names.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(i) => i.kind().name(),
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Str(_) => "string",
            Value::Pointer(_) => "pointer",
            Value::Struct(_) => "struct",
            Value::Array(_) => "array",
            Value::Any(_) => "any",
            Value::Map(_) => "map",
        }
    }

    /// Full type name in source syntax, e.g. `map[string]*Point`.
    pub fn type_name(&self, names: &dyn StringLookup) -> String {
        match self.dynamic_type() {
            Some(ty) => ty.display(names).to_string(),
            None => "untyped nil".to_string(),
        }
    }

    /// Whether this is a nil value of a nil-able kind.
    pub fn is_nil(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Pointer(p) => p.is_nil(),
            Value::Any(a) => a.is_nil(),
            Value::Map(m) => m.is_nil(),
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<IntValue> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<&PointerValue> {
        match self {
            Value::Pointer(p) => Some(p),
            _ => None,
        }
    }
}

// Trait Implementations

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::equality::equal(self, other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        crate::equality::hash_into(self, state);
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i:?})"),
            Value::Float32(x) => write!(f, "Float32({x})"),
            Value::Float64(x) => write!(f, "Float64({x})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Pointer(p) => match p.slot() {
                Some(slot) => {
                    write!(f, "Pointer(slot {}", slot.raw())?;
                    for index in p.path() {
                        write!(f, ".{index}")?;
                    }
                    write!(f, ")")
                }
                None => write!(f, "Pointer(nil)"),
            },
            Value::Struct(s) => write!(f, "Struct({:?})", s.fields()),
            Value::Array(a) => write!(f, "Array({:?})", a.elems()),
            Value::Any(a) => match (a.tag(), a.value()) {
                (Some(tag), Some(v)) => write!(f, "Any({}, {v:?})", tag.kind_name()),
                _ => write!(f, "Any(nil)"),
            },
            Value::Map(m) => match m.state() {
                MapState::Nil => write!(f, "Map(nil)"),
                _ => write!(f, "Map({} entries)", m.len()),
            },
        }
    }
}

/// Renders values the way the language's `print` does: `{1 2}` for
/// structs, `[1 2 3]` for arrays, `map[a:1 b:2]` for maps (keys sorted by
/// their rendering), `<nil>` for nil.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float32(x) => write!(f, "{x}"),
            Value::Float64(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{}", &**s),
            Value::Pointer(p) => match p.slot() {
                Some(slot) => {
                    write!(f, "0x{:08x}", slot.raw())?;
                    for index in p.path() {
                        write!(f, "+{index}")?;
                    }
                    Ok(())
                }
                None => write!(f, "<nil>"),
            },
            Value::Struct(s) => write_spaced(f, '{', s.fields(), '}'),
            Value::Array(a) => write_spaced(f, '[', a.elems(), ']'),
            Value::Any(a) => match a.value() {
                Some(v) => write!(f, "{v}"),
                None => write!(f, "<nil>"),
            },
            Value::Map(m) => {
                let mut rendered: Vec<(String, String)> = m
                    .entries()
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                rendered.sort();
                write!(f, "map[")?;
                for (i, (k, v)) in rendered.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

fn write_spaced(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}
