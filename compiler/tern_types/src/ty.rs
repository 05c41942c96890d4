//! The `Type` descriptor.

use std::fmt;
use std::sync::Arc;

use tern_ir::StringLookup;

use crate::{ArrayLen, ArrayType, FloatKind, IntKind, MapType, StructType};

/// A runtime type descriptor.
///
/// Composite descriptors are behind `Arc` so values can carry their type
/// without deep copies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Int(IntKind),
    Float(FloatKind),
    Str,
    /// The empty interface: holds any value together with its dynamic type.
    Any,
    /// Pointer to a value of the inner type.
    Pointer(Arc<Type>),
    Struct(Arc<StructType>),
    Array(Arc<ArrayType>),
    Map(Arc<MapType>),
}

impl Type {
    pub const INT: Type = Type::Int(IntKind::Int);
    pub const FLOAT32: Type = Type::Float(FloatKind::F32);
    pub const FLOAT64: Type = Type::Float(FloatKind::F64);

    /// `*T`
    pub fn pointer_to(pointee: Type) -> Self {
        Type::Pointer(Arc::new(pointee))
    }

    pub fn structure(ty: StructType) -> Self {
        Type::Struct(Arc::new(ty))
    }

    /// `[n]T`
    pub fn array(elem: Type, len: usize) -> Self {
        Type::Array(Arc::new(ArrayType::fixed(elem, len)))
    }

    /// `[]T`
    pub fn slice(elem: Type) -> Self {
        Type::Array(Arc::new(ArrayType::inferred(elem)))
    }

    /// `map[K]V`
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Arc::new(MapType::new(key, value)))
    }

    /// Whether the untyped `nil` is assignable to this type.
    ///
    /// Inferred-length arrays play the role of slices and take `nil` as
    /// their empty value.
    pub fn accepts_nil(&self) -> bool {
        match self {
            Type::Pointer(_) | Type::Map(_) | Type::Any => true,
            Type::Array(arr) => arr.len == ArrayLen::Inferred,
            _ => false,
        }
    }

    /// Short category name used in diagnostics that have no interner.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::Int(kind) => kind.name(),
            Type::Float(kind) => kind.name(),
            Type::Str => "string",
            Type::Any => "any",
            Type::Pointer(_) => "pointer",
            Type::Struct(_) => "struct",
            Type::Array(_) => "array",
            Type::Map(_) => "map",
        }
    }

    /// Render the type in source syntax, resolving struct names.
    pub fn display<'a, I: StringLookup + ?Sized>(&'a self, interner: &'a I) -> TypeDisplay<'a, I> {
        TypeDisplay { ty: self, interner }
    }
}

/// `Display` adapter returned by [`Type::display`].
pub struct TypeDisplay<'a, I: StringLookup + ?Sized> {
    ty: &'a Type,
    interner: &'a I,
}

impl<I: StringLookup + ?Sized> fmt::Display for TypeDisplay<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            Type::Pointer(inner) => write!(f, "*{}", inner.display(self.interner)),
            Type::Struct(st) => f.write_str(self.interner.lookup(st.name())),
            Type::Array(arr) => match arr.len {
                ArrayLen::Fixed(n) => write!(f, "[{n}]{}", arr.elem.display(self.interner)),
                ArrayLen::Inferred => write!(f, "[]{}", arr.elem.display(self.interner)),
            },
            Type::Map(m) => write!(
                f,
                "map[{}]{}",
                m.key.display(self.interner),
                m.value.display(self.interner)
            ),
            other => f.write_str(other.kind_name()),
        }
    }
}
