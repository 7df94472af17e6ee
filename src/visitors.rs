//! Read-only mapping from object ids to their visitor sets.
//!
//! Supplied by the data layer (which aggregates check-ins) and treated as an
//! immutable snapshot for the duration of a selection call. Lookups for ids
//! the index has never seen fail with [`IsosError::UnknownObject`] rather
//! than inventing an empty visitor set.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IsosError, Result};
use crate::types::{ObjectId, UserId};

/// Object id → set of visitor ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitorIndex {
    map: FxHashMap<ObjectId, FxHashSet<UserId>>,
}

impl VisitorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(object id, visitors)` pairs. Duplicate ids merge their
    /// visitor sets.
    pub fn from_entries<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ObjectId, V)>,
        V: IntoIterator<Item = UserId>,
    {
        let mut index = Self::new();
        for (id, visitors) in entries {
            index.insert(id, visitors);
        }
        index
    }

    /// Register visitors for an object, merging with any existing set.
    pub fn insert<V>(&mut self, id: ObjectId, visitors: V)
    where
        V: IntoIterator<Item = UserId>,
    {
        self.map.entry(id).or_default().extend(visitors);
    }

    /// Visitor set for a single object.
    ///
    /// # Errors
    ///
    /// Returns [`IsosError::UnknownObject`] if the id is not indexed.
    pub fn get(&self, id: ObjectId) -> Result<&FxHashSet<UserId>> {
        self.map.get(&id).ok_or(IsosError::UnknownObject(id))
    }

    /// Visitor sets for a batch of objects, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`IsosError::UnknownObject`] for the first missing id.
    pub fn get_batch(&self, ids: &[ObjectId]) -> Result<Vec<&FxHashSet<UserId>>> {
        ids.iter().map(|&id| self.get(id)).collect()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.map.contains_key(&id)
    }

    /// Number of indexed objects.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
