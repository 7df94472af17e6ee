//! Incremental spatial object selection for interactive maps.
//!
//! Given a pool of geo-tagged, popularity-weighted objects and the current
//! map viewport, the engine picks a small, spatially separated,
//! representative subset of markers by lazy-greedy submodular maximization,
//! and keeps the picks visually stable across pans and zooms by carrying
//! over the previous call's shown/hidden sets.
//!
//! ```rust
//! use isos::{BoundingBox, Selection, SelectionEngine, SpatialObject, VisitorIndex};
//!
//! let objects = vec![
//!     SpatialObject::new(1, 40.71, -74.00, 0.5)?,
//!     SpatialObject::new(2, 40.73, -73.99, 0.3)?,
//! ];
//! let visitors = VisitorIndex::from_entries([(1_u64, vec![10_u64, 11]), (2, vec![11, 12])]);
//! let engine = SelectionEngine::new(objects, visitors)?;
//!
//! let bounds = BoundingBox::new((40.70, -74.05), (40.80, -73.90))?;
//! let shown = engine.select(&bounds, &bounds, 10, &Selection::empty())?;
//! // Persist `shown` and pass it back as `previous` on the next interaction.
//! # Ok::<(), isos::IsosError>(())
//! ```

pub mod engine;
pub mod error;
pub mod metrics;
pub mod queue;
pub mod selector;
pub mod transition;
pub mod types;
pub mod visitors;

pub use engine::SelectionEngine;
pub use error::{IsosError, Result};

pub use metrics::{haversine_km, haversine_km_bulk, jaccard, jaccard_checked, overlap_coefficient};

pub use queue::{LazyQueue, ScoreEntry};

pub use selector::{coverage_score, lazy_greedy};

pub use transition::{Transition, carry_over, classify};

pub use types::{
    BoundingBox, ObjectId, Selection, SelectionConfig, SpatialObject, UserId,
    validate_coordinates,
};

pub use visitors::VisitorIndex;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{IsosError, Result, SelectionEngine};

    pub use crate::{BoundingBox, Selection, SelectionConfig, SpatialObject};

    pub use crate::{ObjectId, UserId, VisitorIndex};

    pub use crate::metrics::{haversine_km, jaccard};

    pub use crate::transition::Transition;
}
