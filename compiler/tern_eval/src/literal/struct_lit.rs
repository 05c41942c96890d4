//! Struct literals.

use std::sync::Arc;

use tern_types::StructType;
use tern_value::{
    duplicate_field, invalid_literal_key, mixed_struct_literal, too_few_struct_values,
    too_many_struct_values, unknown_field, EvalNote, EvalResult, StructValue,
};

use super::{Entry, EntryKey, LiteralBuilder};

impl LiteralBuilder<'_> {
    /// Build `T{...}` for a struct type `T`.
    ///
    /// Keyed literals (`T{b: 1}`) set the named fields and leave the rest
    /// zero. Positional literals (`T{1, 2, 3}`) must list every field in
    /// declaration order. An empty literal is the zero value.
    #[tracing::instrument(
        level = "trace",
        skip(self, ty, entries),
        fields(ty = self.names.lookup(ty.name()), entries = entries.len())
    )]
    pub fn build_struct(&self, ty: &Arc<StructType>, entries: Vec<Entry>) -> EvalResult<StructValue> {
        let keyed = entries.iter().filter(|e| e.key.is_some()).count();
        if keyed == 0 && !entries.is_empty() {
            self.positional_struct(ty, entries)
        } else if keyed == entries.len() {
            self.keyed_struct(ty, entries)
        } else {
            Err(mixed_struct_literal())
        }
    }

    fn positional_struct(&self, ty: &Arc<StructType>, entries: Vec<Entry>) -> EvalResult<StructValue> {
        let type_name = self.names.lookup(ty.name());
        let (expected, got) = (ty.len(), entries.len());
        if got > expected {
            return Err(too_many_struct_values(type_name, expected, got));
        }
        if got < expected {
            return Err(too_few_struct_values(type_name, expected, got));
        }

        let fields = ty
            .fields()
            .iter()
            .zip(entries)
            .map(|(field, entry)| {
                self.element(entry.elem, &field.ty).map_err(|err| {
                    err.with_note(EvalNote::new(format!(
                        "in field {} of {type_name} literal",
                        self.names.lookup(field.name)
                    )))
                })
            })
            .collect::<EvalResult<Vec<_>>>()?;

        // Lengths were checked above.
        StructValue::with_fields(Arc::clone(ty), fields)
            .ok_or_else(|| too_few_struct_values(type_name, expected, got))
    }

    fn keyed_struct(&self, ty: &Arc<StructType>, entries: Vec<Entry>) -> EvalResult<StructValue> {
        let type_name = self.names.lookup(ty.name());
        let mut value = StructValue::zeroed(Arc::clone(ty));
        let mut seen = vec![false; ty.len()];

        for entry in entries {
            let Some(EntryKey::Field(name)) = entry.key else {
                return Err(invalid_literal_key(type_name));
            };
            let field_name = self.names.lookup(name);
            let index = ty
                .field_index(name)
                .ok_or_else(|| unknown_field(field_name, type_name))?;
            if std::mem::replace(&mut seen[index], true) {
                return Err(duplicate_field(field_name));
            }
            let field_ty = &ty.fields()[index].ty;
            let elem = self.element(entry.elem, field_ty).map_err(|err| {
                err.with_note(EvalNote::new(format!(
                    "in field {field_name} of {type_name} literal"
                )))
            })?;
            value.set_field(index, elem);
        }

        Ok(value)
    }
}
