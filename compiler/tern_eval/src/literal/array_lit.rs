//! Array literals and the sparse cursor.

use std::sync::Arc;

use tern_types::{ArrayType, Type};
use tern_value::{
    array_index_out_of_range, invalid_literal_key, literal_too_large, negative_array_index,
    ArrayValue, Constant, EvalNote, EvalResult, Value,
};

use super::{Element, Entry, EntryKey, LiteralBuilder};

/// Places array literal elements by cursor.
///
/// 1. An entry with an index key first moves the cursor to that index.
/// 2. The element is written at the cursor, overwriting any earlier write.
/// 3. The cursor advances by one.
///
/// The result is as long as the declared length, or one past the highest
/// position written for inferred-length arrays. Unwritten positions hold
/// the element type's zero value.
pub struct SparseArrayBuilder {
    elems: Vec<Option<Value>>,
    cursor: u64,
    fixed_len: Option<usize>,
    limit: usize,
}

impl SparseArrayBuilder {
    pub fn new(fixed_len: Option<usize>, limit: usize) -> Self {
        SparseArrayBuilder {
            elems: Vec::new(),
            cursor: 0,
            fixed_len,
            limit,
        }
    }

    /// Move the cursor to an explicit index.
    pub fn seek(&mut self, index: i64) -> EvalResult<()> {
        self.cursor = u64::try_from(index).map_err(|_| negative_array_index(index))?;
        Ok(())
    }

    /// The position the next element lands at.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Check that the cursor is a writable position.
    ///
    /// A declared length is the only bound on a fixed-length array. The
    /// size limit bounds how far an inferred-length literal can grow.
    pub fn check_cursor(&self) -> EvalResult<usize> {
        let pos = self.cursor;
        match self.fixed_len {
            Some(len) => match usize::try_from(pos) {
                Ok(p) if p < len => Ok(p),
                _ => Err(array_index_out_of_range(
                    i64::try_from(pos).unwrap_or(i64::MAX),
                    len,
                )),
            },
            None => match usize::try_from(pos) {
                Ok(p) if p < self.limit => Ok(p),
                _ => Err(literal_too_large(pos.saturating_add(1), self.limit)),
            },
        }
    }

    /// Write `value` at the cursor and advance.
    pub fn place(&mut self, value: Value) -> EvalResult<()> {
        let pos = self.check_cursor()?;
        if pos >= self.elems.len() {
            self.elems.resize_with(pos + 1, || None);
        }
        self.elems[pos] = Some(value);
        self.cursor += 1;
        Ok(())
    }

    /// Length of the array built so far.
    pub fn len(&self) -> usize {
        self.fixed_len.unwrap_or(self.elems.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill the gaps with zero values of `elem` and produce the elements.
    pub fn finish(self, elem: &Type) -> Vec<Value> {
        let len = self.len();
        let mut out: Vec<Value> = self
            .elems
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Value::zero(elem)))
            .collect();
        out.resize_with(len, || Value::zero(elem));
        out
    }
}

impl LiteralBuilder<'_> {
    /// Build `[n]T{...}` or `[]T{...}`.
    #[tracing::instrument(
        level = "trace",
        skip(self, ty, entries),
        fields(fixed_len = ?ty.fixed_len(), entries = entries.len())
    )]
    pub fn build_array(&self, ty: &Arc<ArrayType>, entries: Vec<Entry>) -> EvalResult<ArrayValue> {
        let mut builder = SparseArrayBuilder::new(ty.fixed_len(), self.max_len);

        for entry in entries {
            if let Some(key) = entry.key {
                let index = self.array_index(key, ty)?;
                builder.seek(index)?;
            }
            // Bounds come first so a bad index is reported before its element.
            builder.check_cursor()?;
            let pos = builder.cursor();
            let value = self.element(entry.elem, &ty.elem).map_err(|err| {
                err.with_note(EvalNote::new(format!(
                    "in element {pos} of {} literal",
                    self.type_name(&Type::Array(Arc::clone(ty)))
                )))
            })?;
            builder.place(value)?;
        }

        Ok(ArrayValue::from_elems(Arc::clone(ty), builder.finish(&ty.elem)))
    }

    /// Resolve an array literal key to an index.
    fn array_index(&self, key: EntryKey, ty: &Arc<ArrayType>) -> EvalResult<i64> {
        let invalid = || invalid_literal_key(&self.type_name(&Type::Array(Arc::clone(ty))));
        match key {
            EntryKey::Index(index) => Ok(index),
            EntryKey::Key(Element::Const(Constant::Int(n))) => {
                // Past i64 is past any limit.
                Ok(i64::try_from(n).unwrap_or(if n < 0 { i64::MIN } else { i64::MAX }))
            }
            EntryKey::Key(Element::Value(Value::Int(i))) => {
                Ok(i64::try_from(i.as_i128()).unwrap_or(i64::MAX))
            }
            EntryKey::Field(_) | EntryKey::Key(_) => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests;
