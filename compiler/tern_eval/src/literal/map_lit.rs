//! Map literals.

use std::sync::Arc;

use tern_types::{MapType, Type};
use tern_value::{
    invalid_literal_key, missing_map_key, Constant, EvalNote, EvalResult, MapKey, MapValue,
};

use super::{Element, Entry, EntryKey, LiteralBuilder};

impl LiteralBuilder<'_> {
    /// Build `map[K]V{...}`: an initialized map holding every entry.
    ///
    /// Entries are inserted in order, so a repeated key keeps the last value.
    #[tracing::instrument(level = "trace", skip(self, ty, entries), fields(entries = entries.len()))]
    pub fn build_map(&self, ty: &Arc<MapType>, entries: Vec<Entry>) -> EvalResult<MapValue> {
        let map = MapValue::make(Arc::clone(ty));
        let literal_name = || self.type_name(&Type::Map(Arc::clone(ty)));

        for (i, entry) in entries.into_iter().enumerate() {
            let key_elem = match entry.key {
                Some(EntryKey::Key(elem)) => elem,
                Some(EntryKey::Index(index)) => Element::Const(Constant::Int(i128::from(index))),
                Some(EntryKey::Field(_)) => return Err(invalid_literal_key(&literal_name())),
                None => return Err(missing_map_key()),
            };
            let note = || EvalNote::new(format!("in entry {i} of {} literal", literal_name()));
            let key = self
                .element(key_elem, &ty.key)
                .and_then(MapKey::new)
                .map_err(|err| err.with_note(note()))?;
            let value = self
                .element(entry.elem, &ty.value)
                .map_err(|err| err.with_note(note()))?;
            map.insert(key, value)?;
        }

        tracing::debug!(len = map.len(), "built map literal");
        Ok(map)
    }
}
