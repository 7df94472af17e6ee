//! Lazy priority queue over scored candidates.
//!
//! One explicit container behind the lazy-greedy protocol: ordered by
//! marginal-gain estimate, with bulk removal by id and removal by radius.
//! The queue itself never judges staleness — each entry carries the round
//! stamp its gain was computed at, and the selector decides whether a popped
//! entry can be believed or must be rescored and reinserted.
//!
//! Backing store is a single `Vec` kept sorted ascending, so the maximum is
//! popped from the tail in O(1) and a rescored entry is reinserted by binary
//! search. Ordering is total and deterministic: higher gain first, ties
//! broken by smaller object id.

use rustc_hash::FxHashSet;
use std::cmp::Ordering;

use crate::error::{IsosError, Result};
use crate::metrics::haversine_km;
use crate::types::ObjectId;

/// A scored candidate: position, marginal-gain estimate, and the selection
/// round the estimate was computed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEntry {
    pub id: ObjectId,
    pub lat: f64,
    pub lon: f64,
    pub gain: f64,
    pub round: usize,
}

impl ScoreEntry {
    pub fn new(id: ObjectId, lat: f64, lon: f64, gain: f64, round: usize) -> Self {
        Self {
            id,
            lat,
            lon,
            gain,
            round,
        }
    }
}

/// Ascending storage order: worst gain first, so the best entry sits at the
/// tail. Among equal gains the smaller id sorts later and pops first.
fn storage_order(a: &ScoreEntry, b: &ScoreEntry) -> Ordering {
    a.gain.total_cmp(&b.gain).then(b.id.cmp(&a.id))
}

/// Ordered candidate container for lazy-greedy selection.
#[derive(Debug, Clone, Default)]
pub struct LazyQueue {
    entries: Vec<ScoreEntry>,
}

impl LazyQueue {
    /// Build from unsorted entries. O(n log n).
    pub fn build(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_unstable_by(storage_order);
        Self { entries }
    }

    /// Remove and return the highest-gain entry.
    ///
    /// # Errors
    ///
    /// Returns [`IsosError::EmptyQueue`] when no entries remain.
    pub fn pop_max(&mut self) -> Result<ScoreEntry> {
        self.entries.pop().ok_or(IsosError::EmptyQueue)
    }

    /// Reinsert an entry at its sorted position after its gain was
    /// recomputed. O(log n) search plus the shift.
    pub fn insert(&mut self, entry: ScoreEntry) {
        let pos = self
            .entries
            .partition_point(|e| storage_order(e, &entry) == Ordering::Less);
        self.entries.insert(pos, entry);
    }

    /// Drop every entry whose id is in `ids`.
    pub fn remove_ids(&mut self, ids: &FxHashSet<ObjectId>) {
        if ids.is_empty() {
            return;
        }
        self.entries.retain(|e| !ids.contains(&e.id));
    }

    /// Drop every entry within `radius_km` great-circle kilometers of the
    /// given coordinate.
    pub fn remove_within_radius(&mut self, lat: f64, lon: f64, radius_km: f64) {
        self.entries
            .retain(|e| haversine_km(lat, lon, e.lat, e.lon) > radius_km);
    }

    /// Gain of the current best entry without removing it.
    pub fn peek_gain(&self) -> Option<f64> {
        self.entries.last().map(|e| e.gain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
