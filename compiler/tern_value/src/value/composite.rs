//! Struct, array, pointer and `any` values.

use std::sync::Arc;

use tern_ir::Name;
use tern_types::{ArrayType, StructType, Type};

use super::{Heap, Value};
use crate::errors::{array_index_out_of_range, EvalResult};

/// A struct value: one value per declared field, in declaration order.
///
/// Fields live behind an `Arc` and are copied on the first write to a
/// shared instance, so assigning a struct gives an independent copy.
#[derive(Clone, Debug)]
pub struct StructValue {
    ty: Arc<StructType>,
    fields: Arc<Vec<Value>>,
}

impl StructValue {
    /// Every field set to its zero value.
    pub fn zeroed(ty: Arc<StructType>) -> Self {
        let fields = ty.fields().iter().map(|f| Value::zero(&f.ty)).collect();
        StructValue {
            ty,
            fields: Arc::new(fields),
        }
    }

    /// Build from a full field list, or `None` if the count does not match
    /// the declaration.
    pub fn with_fields(ty: Arc<StructType>, fields: Vec<Value>) -> Option<Self> {
        if fields.len() != ty.len() {
            return None;
        }
        Some(StructValue {
            ty,
            fields: Arc::new(fields),
        })
    }

    pub fn ty(&self) -> &Arc<StructType> {
        &self.ty
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    pub fn get_field(&self, name: Name) -> Option<&Value> {
        self.ty.field_index(name).and_then(|i| self.fields.get(i))
    }

    /// Mutable access to the field at `index`, unsharing the fields first.
    pub fn field_mut(&mut self, index: usize) -> Option<&mut Value> {
        Arc::make_mut(&mut self.fields).get_mut(index)
    }

    /// Replace the field at `index`, returning the previous value.
    pub fn set_field(&mut self, index: usize, value: Value) -> Option<Value> {
        let slot = Arc::make_mut(&mut self.fields).get_mut(index)?;
        Some(std::mem::replace(slot, value))
    }

    /// Replace a field by name, returning the previous value.
    pub fn set_named(&mut self, name: Name, value: Value) -> Option<Value> {
        let index = self.ty.field_index(name)?;
        self.set_field(index, value)
    }
}

/// An array value. The length is fixed once built.
#[derive(Clone, Debug)]
pub struct ArrayValue {
    ty: Arc<ArrayType>,
    elems: Arc<Vec<Value>>,
}

impl ArrayValue {
    pub fn from_elems(ty: Arc<ArrayType>, elems: Vec<Value>) -> Self {
        ArrayValue {
            ty,
            elems: Arc::new(elems),
        }
    }

    pub fn ty(&self) -> &Arc<ArrayType> {
        &self.ty
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elems.get(index)
    }

    pub fn elems(&self) -> &[Value] {
        &self.elems
    }

    /// Mutable access to the element at `index`, unsharing the elements
    /// first.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        Arc::make_mut(&mut self.elems).get_mut(index)
    }

    /// Overwrite the element at `index`.
    pub fn set(&mut self, index: usize, value: Value) -> EvalResult<()> {
        let len = self.elems.len();
        match Arc::make_mut(&mut self.elems).get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(array_index_out_of_range(
                i64::try_from(index).unwrap_or(i64::MAX),
                len,
            )),
        }
    }
}

/// Identity token of an allocated slot. Tokens are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl SlotId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        SlotId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A pointer: a slot token (none for nil), a member path and the pointee
/// type.
///
/// The path is empty for `&x` and `new(T)`. `&p.f` and `&p[i]` extend the
/// path of `p` by the field or element index, so the address of a member
/// is identified by its slot and path. Two member pointers taken
/// separately to the same member are equal.
#[derive(Clone, Debug)]
pub struct PointerValue {
    slot: Option<SlotId>,
    path: Arc<[usize]>,
    pointee: Arc<Type>,
}

impl PointerValue {
    pub fn nil(pointee: Arc<Type>) -> Self {
        PointerValue {
            slot: None,
            path: Arc::from([]),
            pointee,
        }
    }

    pub fn to(slot: SlotId, pointee: Arc<Type>) -> Self {
        PointerValue {
            slot: Some(slot),
            path: Arc::from([]),
            pointee,
        }
    }

    /// Pointer to member `index` of this pointer's target, or `None` for
    /// a nil pointer.
    pub fn member(&self, index: usize, pointee: Arc<Type>) -> Option<Self> {
        let slot = self.slot?;
        let path: Arc<[usize]> = self.path.iter().copied().chain([index]).collect();
        Some(PointerValue {
            slot: Some(slot),
            path,
            pointee,
        })
    }

    pub fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    /// Field and element indices from the slot's value to the target.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn pointee(&self) -> &Arc<Type> {
        &self.pointee
    }

    pub fn is_nil(&self) -> bool {
        self.slot.is_none()
    }
}

/// A value stored in an `any`, with its dynamic type.
#[derive(Debug)]
pub struct Boxed {
    pub tag: Type,
    pub value: Value,
}

/// An `any` value: nil, or a boxed value tagged with its dynamic type.
#[derive(Clone, Debug)]
pub struct AnyValue {
    inner: Option<Heap<Boxed>>,
}

impl AnyValue {
    pub const fn nil() -> Self {
        AnyValue { inner: None }
    }

    pub(super) fn boxed(tag: Type, value: Value) -> Self {
        AnyValue {
            inner: Some(Heap::new(Boxed { tag, value })),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.inner.is_none()
    }

    /// The dynamic type, or `None` for a nil `any`.
    pub fn tag(&self) -> Option<&Type> {
        self.inner.as_ref().map(|b| &b.tag)
    }

    /// The boxed value, or `None` for a nil `any`.
    pub fn value(&self) -> Option<&Value> {
        self.inner.as_ref().map(|b| &b.value)
    }
}
