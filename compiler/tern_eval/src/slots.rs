//! Storage behind pointers.
//!
//! Every `new(T)` or `&x` allocates one slot and hands out its token.
//! Tokens are indices into an append-only table, so they are never reused.
//! A pointer to a struct field or array element (`&p.f`, `&p[i]`) shares
//! its container's token and adds a member path. Two pointers alias
//! exactly when their tokens and paths match.

use std::sync::Arc;

use parking_lot::RwLock;
use tern_types::Type;
use tern_value::{
    array_index_out_of_range, dangling_pointer, nil_pointer_dereference, EvalError, EvalResult,
    PointerValue, SlotId, Value,
};

/// Append-only table of pointer targets.
#[derive(Default)]
pub struct SlotArena {
    slots: RwLock<Vec<Value>>,
}

impl SlotArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` in a fresh slot and return a pointer to it.
    pub fn alloc(&self, value: Value, pointee: Arc<Type>) -> PointerValue {
        let mut slots = self.slots.write();
        let slot = SlotId::new(slots.len() as u64);
        slots.push(value);
        tracing::debug!(slot = slot.raw(), pointee = pointee.kind_name(), "allocated slot");
        PointerValue::to(slot, pointee)
    }

    /// Read through `ptr`, following its member path.
    pub fn load(&self, ptr: &PointerValue) -> EvalResult<Value> {
        let slot = ptr.slot().ok_or_else(nil_pointer_dereference)?;
        let slots = self.slots.read();
        let mut target = index(slot)
            .and_then(|i| slots.get(i))
            .ok_or_else(|| dangling_pointer(slot.raw()))?;
        for &member in ptr.path() {
            target = member_of(target, member, slot)?;
        }
        Ok(target.clone())
    }

    /// Write through `ptr`, following its member path.
    pub fn store(&self, ptr: &PointerValue, value: Value) -> EvalResult<()> {
        let slot = ptr.slot().ok_or_else(nil_pointer_dereference)?;
        let mut slots = self.slots.write();
        let mut target = index(slot)
            .and_then(|i| slots.get_mut(i))
            .ok_or_else(|| dangling_pointer(slot.raw()))?;
        for &member in ptr.path() {
            target = member_of_mut(target, member, slot)?;
        }
        *target = value;
        Ok(())
    }

    /// Number of slots allocated so far.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn index(slot: SlotId) -> Option<usize> {
    usize::try_from(slot.raw()).ok()
}

// An element index can fall outside an inferred-length array that was
// replaced by a shorter one after the pointer was taken.
fn member_of(value: &Value, member: usize, slot: SlotId) -> EvalResult<&Value> {
    match value {
        Value::Struct(s) => s.field(member).ok_or_else(|| dangling_pointer(slot.raw())),
        Value::Array(a) => a
            .get(member)
            .ok_or_else(|| out_of_range(member, a.len())),
        _ => Err(dangling_pointer(slot.raw())),
    }
}

fn member_of_mut(value: &mut Value, member: usize, slot: SlotId) -> EvalResult<&mut Value> {
    match value {
        Value::Struct(s) => s
            .field_mut(member)
            .ok_or_else(|| dangling_pointer(slot.raw())),
        Value::Array(a) => {
            let len = a.len();
            a.get_mut(member).ok_or_else(|| out_of_range(member, len))
        }
        _ => Err(dangling_pointer(slot.raw())),
    }
}

fn out_of_range(member: usize, len: usize) -> EvalError {
    array_index_out_of_range(i64::try_from(member).unwrap_or(i64::MAX), len)
}

impl std::fmt::Debug for SlotArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotArena").field("len", &self.len()).finish()
    }
}
