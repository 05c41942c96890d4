//! Map values.
//!
//! A map is either nil (the zero value: reads see an empty map, writes
//! fail) or live. A live map is a handle to a shared table: copying the
//! value copies the handle, and writes through any copy are seen by all.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tern_types::MapType;

use super::Value;
use crate::equality;
use crate::errors::{assignment_to_nil_map, EvalResult};

/// A checked map key.
///
/// Construction rejects unhashable values, so every `MapKey` has a
/// well-defined hash. Equality and hashing go through the equality engine.
#[derive(Clone, Debug)]
pub struct MapKey(Value);

impl MapKey {
    pub fn new(value: Value) -> EvalResult<Self> {
        equality::check_hashable(&value)?;
        Ok(MapKey(value))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        equality::equal(&self.0, &other.0)
    }
}

// NaN float keys are the one non-reflexive case: every insert of a NaN key
// adds a new entry and no lookup finds one.
impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        equality::hash_into(&self.0, state);
    }
}

type Table = FxHashMap<MapKey, Value>;

/// Observable state of a map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapState {
    /// Never initialized.
    Nil,
    /// Initialized with no entries.
    Empty,
    /// Initialized with at least one entry.
    Populated,
}

/// A map value.
#[derive(Clone, Debug)]
pub enum MapValue {
    Nil {
        ty: Arc<MapType>,
    },
    Live {
        ty: Arc<MapType>,
        table: Arc<RwLock<Table>>,
    },
}

impl MapValue {
    /// The zero map of a type.
    pub fn nil(ty: Arc<MapType>) -> Self {
        MapValue::Nil { ty }
    }

    /// A fresh, empty, initialized map.
    pub fn make(ty: Arc<MapType>) -> Self {
        MapValue::Live {
            ty,
            table: Arc::new(RwLock::new(Table::default())),
        }
    }

    pub fn ty(&self) -> &Arc<MapType> {
        match self {
            MapValue::Nil { ty } | MapValue::Live { ty, .. } => ty,
        }
    }

    pub fn state(&self) -> MapState {
        match self {
            MapValue::Nil { .. } => MapState::Nil,
            MapValue::Live { table, .. } if table.read().is_empty() => MapState::Empty,
            MapValue::Live { .. } => MapState::Populated,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, MapValue::Nil { .. })
    }

    pub fn len(&self) -> usize {
        match self {
            MapValue::Nil { .. } => 0,
            MapValue::Live { table, .. } => table.read().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value for `key`, or the value type's zero value when absent.
    pub fn get(&self, key: &MapKey) -> Value {
        self.get_ok(key).0
    }

    /// Comma-ok lookup: the value (zero when absent) and whether it was present.
    pub fn get_ok(&self, key: &MapKey) -> (Value, bool) {
        let found = match self {
            MapValue::Nil { .. } => None,
            MapValue::Live { table, .. } => table.read().get(key).cloned(),
        };
        match found {
            Some(value) => (value, true),
            None => (Value::zero(&self.ty().value), false),
        }
    }

    /// Insert or overwrite. Fails on a nil map.
    pub fn insert(&self, key: MapKey, value: Value) -> EvalResult<()> {
        match self {
            MapValue::Nil { .. } => Err(assignment_to_nil_map()),
            MapValue::Live { table, .. } => {
                table.write().insert(key, value);
                Ok(())
            }
        }
    }

    /// Remove `key`, returning its value. A no-op on a nil map.
    pub fn remove(&self, key: &MapKey) -> Option<Value> {
        match self {
            MapValue::Nil { .. } => None,
            MapValue::Live { table, .. } => table.write().remove(key),
        }
    }

    /// Snapshot of all entries, in no particular order.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        match self {
            MapValue::Nil { .. } => Vec::new(),
            MapValue::Live { table, .. } => table
                .read()
                .iter()
                .map(|(k, v)| (k.value().clone(), v.clone()))
                .collect(),
        }
    }

    /// Whether both handles refer to the same table. Two nil maps of the
    /// same type count as the same map.
    pub fn same_map(&self, other: &MapValue) -> bool {
        match (self, other) {
            (MapValue::Nil { ty: a }, MapValue::Nil { ty: b }) => a == b,
            (MapValue::Live { table: a, .. }, MapValue::Live { table: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }

    /// Address of the shared table, `0` for nil. Stable for the map's lifetime.
    pub(crate) fn identity(&self) -> usize {
        match self {
            MapValue::Nil { .. } => 0,
            MapValue::Live { table, .. } => Arc::as_ptr(table) as usize,
        }
    }
}
