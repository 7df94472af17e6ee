//! The incremental selection entry point.
//!
//! [`SelectionEngine`] is an explicitly constructed, read-only data-access
//! context: it owns the object table and visitor index for one dataset
//! snapshot and validates both up front. Selection itself is a pure function
//! of the engine's snapshot and the per-call inputs, so independent sessions
//! can share one engine without locking — all carry-over state lives in the
//! caller's [`Selection`] value.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::error::{IsosError, Result};
use crate::metrics::haversine_km;
use crate::selector::lazy_greedy;
use crate::transition::{carry_over, classify};
use crate::types::{BoundingBox, ObjectId, Selection, SelectionConfig, SpatialObject};
use crate::visitors::VisitorIndex;

/// Read-only selection context over one dataset snapshot.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    objects: Vec<SpatialObject>,
    visitors: VisitorIndex,
    config: SelectionConfig,
}

impl SelectionEngine {
    /// Create an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IsosError::InvalidInput`] for duplicate or malformed
    /// objects and [`IsosError::UnknownObject`] if any object lacks a
    /// visitor index entry.
    pub fn new(objects: Vec<SpatialObject>, visitors: VisitorIndex) -> Result<Self> {
        Self::with_config(objects, visitors, SelectionConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(
        objects: Vec<SpatialObject>,
        visitors: VisitorIndex,
        config: SelectionConfig,
    ) -> Result<Self> {
        let mut seen: FxHashSet<ObjectId> = FxHashSet::default();
        for object in &objects {
            if !seen.insert(object.id) {
                return Err(IsosError::InvalidInput(format!(
                    "Duplicate object id: {}",
                    object.id
                )));
            }
            // Objects may come from deserialized snapshots, so re-validate.
            SpatialObject::new(object.id, object.lat, object.lon, object.weight)?;
            if !visitors.contains(object.id) {
                return Err(IsosError::UnknownObject(object.id));
            }
        }

        Ok(Self {
            objects,
            visitors,
            config,
        })
    }

    /// Select up to `k` markers for the current viewport, carrying over the
    /// previous call's selection state.
    ///
    /// Returns the new `Selection`: `selected` is the marker set to render,
    /// `hidden` the in-viewport objects suppressed this round. The caller
    /// persists the returned value and passes it back as `previous` on the
    /// next interaction; pass [`Selection::empty`] (and any previous bounds)
    /// on the first call.
    ///
    /// # Errors
    ///
    /// Returns [`IsosError::InvalidInput`] when the viewport holds more
    /// objects than the configured `max_candidates` cap.
    pub fn select(
        &self,
        previous_bounds: &BoundingBox,
        bounds: &BoundingBox,
        k: usize,
        previous: &Selection,
    ) -> Result<Selection> {
        let pool: Vec<SpatialObject> = self
            .objects
            .iter()
            .filter(|o| bounds.contains(o.lat, o.lon))
            .copied()
            .collect();
        log::debug!("{} objects in current viewport", pool.len());

        if pool.len() > self.config.max_candidates {
            return Err(IsosError::InvalidInput(format!(
                "Candidate pool of {} exceeds cap of {}",
                pool.len(),
                self.config.max_candidates
            )));
        }

        // Nothing to rank: show everything in view.
        if pool.len() <= k {
            return Ok(Selection {
                selected: pool.iter().map(|o| o.id).collect(),
                hidden: Vec::new(),
            });
        }

        if k == 0 {
            return Ok(Selection {
                selected: Vec::new(),
                hidden: pool.iter().map(|o| o.id).collect(),
            });
        }

        let separation_km = bounds.width_km() * self.config.separation_fraction;
        let transition = classify(previous_bounds, bounds);
        log::debug!(
            "transition {:?}, separation distance {:.3} km",
            transition,
            separation_km
        );

        let pool_ids: FxHashSet<ObjectId> = pool.iter().map(|o| o.id).collect();
        let (mut seed, excluded) = carry_over(transition, previous, &pool_ids);
        // The caller may shrink k between interactions; the carried set must
        // still respect it.
        seed.truncate(k);

        let seed_set: FxHashSet<ObjectId> = seed.iter().copied().collect();
        let mut candidates: Vec<SpatialObject> = pool
            .iter()
            .filter(|o| !seed_set.contains(&o.id) && !excluded.contains(&o.id))
            .copied()
            .collect();

        // Carried-over markers keep suppressing nearby candidates.
        for &seed_id in &seed {
            let anchor = pool
                .iter()
                .find(|o| o.id == seed_id)
                .copied()
                .ok_or(IsosError::UnknownObject(seed_id))?;
            let before = candidates.len();
            candidates
                .retain(|o| haversine_km(anchor.lat, anchor.lon, o.lat, o.lon) > separation_km);
            if candidates.len() != before {
                log::debug!(
                    "pruned {} candidates too close to carried-over object {}",
                    before - candidates.len(),
                    seed_id
                );
            }
        }

        let selected = lazy_greedy(&pool, &self.visitors, &seed, &candidates, k, separation_km)?;

        let selected_set: FxHashSet<ObjectId> = selected.iter().copied().collect();
        let hidden = pool
            .iter()
            .map(|o| o.id)
            .filter(|id| !selected_set.contains(id))
            .collect();

        Ok(Selection { selected, hidden })
    }

    /// Baseline selector: `k` uniformly random in-viewport objects.
    ///
    /// No carry-over, no separation, no coverage objective — useful for
    /// comparing the greedy selection against chance.
    pub fn random_select<R: Rng + ?Sized>(
        &self,
        bounds: &BoundingBox,
        k: usize,
        rng: &mut R,
    ) -> Result<Selection> {
        let pool: Vec<&SpatialObject> = self
            .objects
            .iter()
            .filter(|o| bounds.contains(o.lat, o.lon))
            .collect();

        let amount = k.min(pool.len());
        let picked = rand::seq::index::sample(rng, pool.len(), amount);
        let picked_set: FxHashSet<usize> = picked.iter().collect();

        let selected = picked.iter().map(|i| pool[i].id).collect();
        let hidden = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| !picked_set.contains(i))
            .map(|(_, o)| o.id)
            .collect();

        Ok(Selection { selected, hidden })
    }

    /// The full object table backing this engine.
    pub fn objects(&self) -> &[SpatialObject] {
        &self.objects
    }

    pub fn visitors(&self) -> &VisitorIndex {
        &self.visitors
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Number of objects in the table.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
