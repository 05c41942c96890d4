//! The runtime facade.

use std::sync::Arc;

use tern_ir::{Name, SharedInterner, StringLookup};
use tern_types::{ArrayType, MapType, StructType, Type};
use tern_value::equality;
use tern_value::{
    array_index_out_of_range, negative_array_index, nil_pointer_dereference, not_addressable,
    unknown_field, ArrayValue, Constant, Converter, EvalResult, MapKey, MapValue, PointerValue,
    StructValue, Value,
};

use crate::config::RuntimeConfig;
use crate::literal::{Entry, LiteralBuilder};
use crate::slots::SlotArena;

/// Composite literals, conversions, pointers and maps behind one handle.
///
/// A `Runtime` owns the slot arena that pointers refer to, so pointers
/// from one runtime are dangling in another.
///
/// ```text
/// let rt = Runtime::new();
/// let m = rt.make_map(&ty);
/// rt.map_set(&m, Value::string("a"), Value::int(1))?;
/// ```
#[derive(Debug, Default)]
pub struct Runtime {
    interner: SharedInterner,
    slots: SlotArena,
    config: RuntimeConfig,
}

impl Runtime {
    /// A runtime with the default configuration and a fresh interner.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Runtime {
            config,
            ..Self::default()
        }
    }

    /// Use an interner shared with the host (parser, type checker).
    #[must_use]
    pub fn with_interner(mut self, interner: SharedInterner) -> Self {
        self.interner = interner;
        self
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    fn converter(&self) -> Converter<'_> {
        Converter::new(&self.interner).with_float32_saturation(self.config.saturate_float32)
    }

    fn literals(&self) -> LiteralBuilder<'_> {
        LiteralBuilder::new(
            &self.interner,
            self.converter(),
            &self.slots,
            self.config.max_literal_len,
        )
    }

    // Composite literals

    pub fn build_struct(&self, ty: &Arc<StructType>, entries: Vec<Entry>) -> EvalResult<StructValue> {
        self.literals().build_struct(ty, entries)
    }

    pub fn build_array(&self, ty: &Arc<ArrayType>, entries: Vec<Entry>) -> EvalResult<ArrayValue> {
        self.literals().build_array(ty, entries)
    }

    pub fn build_map(&self, ty: &Arc<MapType>, entries: Vec<Entry>) -> EvalResult<MapValue> {
        self.literals().build_map(ty, entries)
    }

    pub fn build_composite(&self, ty: &Type, entries: Vec<Entry>) -> EvalResult<Value> {
        self.literals().build_composite(ty, entries)
    }

    // Conversions

    /// Explicit conversion `T(value)`.
    pub fn convert(&self, value: &Value, target: &Type) -> EvalResult<Value> {
        self.converter().convert(value, target)
    }

    /// Give an untyped constant the type `target`.
    pub fn convert_constant(&self, constant: &Constant, target: &Type) -> EvalResult<Value> {
        self.converter().constant(constant, target)
    }

    /// Store `value` into a slot of type `target` (boxing for `any`).
    pub fn assign(&self, value: Value, target: &Type) -> EvalResult<Value> {
        self.converter().assign(value, target)
    }

    // Pointers

    /// `&value`: allocate a slot holding `value`, typed as `pointee`.
    pub fn alloc(&self, value: Value, pointee: &Type) -> EvalResult<PointerValue> {
        let value = self.assign(value, pointee)?;
        Ok(self.slots.alloc(value, Arc::new(pointee.clone())))
    }

    /// `new(T)`: allocate a slot holding `T`'s zero value.
    pub fn new_pointer(&self, pointee: &Type) -> PointerValue {
        self.slots
            .alloc(Value::zero(pointee), Arc::new(pointee.clone()))
    }

    /// `*ptr`
    pub fn load(&self, ptr: &PointerValue) -> EvalResult<Value> {
        self.slots.load(ptr)
    }

    /// `*ptr = value`
    pub fn store(&self, ptr: &PointerValue, value: Value) -> EvalResult<()> {
        let value = self.assign(value, ptr.pointee())?;
        self.slots.store(ptr, value)
    }

    /// `&p.f`: pointer to field `field` of the struct `p` points to.
    pub fn field_pointer(&self, ptr: &PointerValue, field: Name) -> EvalResult<PointerValue> {
        let Type::Struct(st) = &**ptr.pointee() else {
            return Err(not_addressable(&self.type_name(ptr.pointee())));
        };
        let index = st.field_index(field).ok_or_else(|| {
            unknown_field(
                self.interner.lookup(field),
                &self.type_name(ptr.pointee()),
            )
        })?;
        let field_ty = st
            .field(index)
            .map(|f| f.ty.clone())
            .ok_or_else(|| not_addressable(&self.type_name(ptr.pointee())))?;
        ptr.member(index, Arc::new(field_ty))
            .ok_or_else(nil_pointer_dereference)
    }

    /// `&p[i]`: pointer to element `index` of the array `p` points to.
    pub fn element_pointer(&self, ptr: &PointerValue, index: i64) -> EvalResult<PointerValue> {
        let Type::Array(arr) = &**ptr.pointee() else {
            return Err(not_addressable(&self.type_name(ptr.pointee())));
        };
        let pos = usize::try_from(index).map_err(|_| negative_array_index(index))?;
        let len = match arr.fixed_len() {
            Some(len) => len,
            None => match self.load(ptr)? {
                Value::Array(current) => current.len(),
                _ => 0,
            },
        };
        if pos >= len {
            return Err(array_index_out_of_range(index, len));
        }
        ptr.member(pos, Arc::new(arr.elem.clone()))
            .ok_or_else(nil_pointer_dereference)
    }

    fn type_name(&self, ty: &Type) -> String {
        ty.display(&self.interner).to_string()
    }

    // Maps

    /// `make(map[K]V)`
    pub fn make_map(&self, ty: &Arc<MapType>) -> MapValue {
        tracing::debug!(
            key = ty.key.kind_name(),
            value = ty.value.kind_name(),
            "make map"
        );
        MapValue::make(Arc::clone(ty))
    }

    /// Coerce `key` to the map's key type and check it is hashable.
    fn map_key(&self, map: &MapValue, key: Value) -> EvalResult<MapKey> {
        MapKey::new(self.assign(key, &map.ty().key)?)
    }

    /// `m[key]`: the zero value when absent or when `map` is nil.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn map_get(&self, map: &MapValue, key: Value) -> EvalResult<Value> {
        let key = self.map_key(map, key)?;
        Ok(map.get(&key))
    }

    /// `v, ok := m[key]`
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn map_get_ok(&self, map: &MapValue, key: Value) -> EvalResult<(Value, bool)> {
        let key = self.map_key(map, key)?;
        Ok(map.get_ok(&key))
    }

    /// `m[key] = value`. Fails on a nil map.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn map_set(&self, map: &MapValue, key: Value, value: Value) -> EvalResult<()> {
        let key = self.map_key(map, key)?;
        let value = self.assign(value, &map.ty().value)?;
        map.insert(key, value)
    }

    /// `delete(m, key)`. A no-op on a nil map or an absent key.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn map_delete(&self, map: &MapValue, key: Value) -> EvalResult<()> {
        let key = self.map_key(map, key)?;
        map.remove(&key);
        Ok(())
    }

    /// `len(m)`
    pub fn map_len(&self, map: &MapValue) -> usize {
        map.len()
    }

    /// `m == nil`
    pub fn is_nil(&self, map: &MapValue) -> bool {
        map.is_nil()
    }

    /// Snapshot of a map's entries, in no particular order.
    pub fn map_entries(&self, map: &MapValue) -> Vec<(Value, Value)> {
        map.entries()
    }

    // Comparison

    /// `a == b`
    pub fn compare(&self, a: &Value, b: &Value) -> EvalResult<bool> {
        equality::compare(a, b, &self.interner)
    }
}
