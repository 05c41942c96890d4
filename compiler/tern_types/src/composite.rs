//! Composite type descriptors: structs, arrays and maps.

use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};

use tern_ir::Name;

use crate::Type;

/// One declared struct field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDef {
    pub name: Name,
    pub ty: Type,
}

impl FieldDef {
    pub fn new(name: Name, ty: Type) -> Self {
        FieldDef { name, ty }
    }
}

/// Struct type: a name plus an ordered field list.
///
/// Declaration order drives positional literals and equality; the name
/// index gives O(1) lookup for keyed literals.
#[derive(Clone, Debug)]
pub struct StructType {
    name: Name,
    fields: Vec<FieldDef>,
    /// Map from field name to declaration index.
    field_indices: FxHashMap<Name, usize>,
}

impl StructType {
    /// Create a struct type. When a field name repeats, lookups by name
    /// resolve to the first declaration.
    pub fn new(name: Name, fields: Vec<FieldDef>) -> Self {
        let mut field_indices = FxHashMap::default();
        for (i, field) in fields.iter().enumerate() {
            field_indices.entry(field.name).or_insert(i);
        }
        StructType {
            name,
            fields,
            field_indices,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Get the declaration index of a field by name.
    pub fn field_index(&self, field: Name) -> Option<usize> {
        self.field_indices.get(&field).copied()
    }

    pub fn field(&self, index: usize) -> Option<&FieldDef> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// The name index is derived from `fields`, so it is left out of both impls.
impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for StructType {}

impl Hash for StructType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.fields.hash(state);
    }
}

/// Declared length of an array type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayLen {
    /// `[n]T`: the literal may not write at or past `n`.
    Fixed(usize),
    /// `[]T` / `[...]T`: length comes from the literal.
    Inferred,
}

/// Array type: element type plus declared length.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayType {
    pub elem: Type,
    pub len: ArrayLen,
}

impl ArrayType {
    pub fn fixed(elem: Type, len: usize) -> Self {
        ArrayType {
            elem,
            len: ArrayLen::Fixed(len),
        }
    }

    pub fn inferred(elem: Type) -> Self {
        ArrayType {
            elem,
            len: ArrayLen::Inferred,
        }
    }

    /// Declared length, if fixed.
    pub fn fixed_len(&self) -> Option<usize> {
        match self.len {
            ArrayLen::Fixed(n) => Some(n),
            ArrayLen::Inferred => None,
        }
    }
}

/// Map type: key type plus value type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MapType {
    pub key: Type,
    pub value: Type,
}

impl MapType {
    pub fn new(key: Type, value: Type) -> Self {
        MapType { key, value }
    }
}

#[cfg(test)]
mod tests;
