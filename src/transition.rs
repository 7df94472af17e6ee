//! Viewport transition classification and marker carry-over.
//!
//! Pan and zoom interactions should not make markers jump around: the
//! previous call's shown set `D` and hidden set `G` seed the next call
//! according to the transition kind instead of re-optimizing from scratch.

use rustc_hash::FxHashSet;

use crate::types::{BoundingBox, ObjectId, Selection};

/// How the viewport moved between two selection calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The new viewport lies strictly inside the previous one.
    ZoomIn,
    /// The previous viewport lies strictly inside the new one.
    ZoomOut,
    /// Anything else, including simultaneous pan-and-zoom.
    Pan,
}

/// Classify the viewport change. Strict containment on both corners is
/// required for a zoom; pan is the fallback.
pub fn classify(previous: &BoundingBox, current: &BoundingBox) -> Transition {
    if previous.strictly_contains(current) {
        Transition::ZoomIn
    } else if current.strictly_contains(previous) {
        Transition::ZoomOut
    } else {
        Transition::Pan
    }
}

/// Derive the seed set and exclusion set for the next selection round.
///
/// | Transition | seed            | excluded        |
/// |------------|-----------------|-----------------|
/// | zoom-in    | `D ∩ pool`      | none            |
/// | zoom-out   | none            | `G ∩ pool`      |
/// | pan        | `D ∩ pool`      | `G ∩ pool`      |
///
/// Zooming in reconsiders previously hidden objects; zooming out gives up
/// the previous focus so the wider view is re-balanced. The seed preserves
/// the previous display order.
pub fn carry_over(
    transition: Transition,
    previous: &Selection,
    pool_ids: &FxHashSet<ObjectId>,
) -> (Vec<ObjectId>, FxHashSet<ObjectId>) {
    let kept_selected = || {
        previous
            .selected
            .iter()
            .copied()
            .filter(|id| pool_ids.contains(id))
            .collect::<Vec<_>>()
    };
    let kept_hidden = || {
        previous
            .hidden
            .iter()
            .copied()
            .filter(|id| pool_ids.contains(id))
            .collect::<FxHashSet<_>>()
    };

    match transition {
        Transition::ZoomIn => (kept_selected(), FxHashSet::default()),
        Transition::ZoomOut => (Vec::new(), kept_hidden()),
        Transition::Pan => (kept_selected(), kept_hidden()),
    }
}
