//! Core data types for incremental spatial object selection.
//!
//! Everything here is a plain, serializable value: the engine never holds
//! mutable state between calls, so callers can persist `Selection` (the
//! carry-over `(D, G)` pair) however they like, e.g. as session JSON.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::error::{IsosError, Result};

/// Identifier of a selectable spatial object (a place).
pub type ObjectId = u64;

/// Identifier of a visitor (a user who checked in).
pub type UserId = u64;

/// Validates a latitude/longitude pair.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0], both finite.
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<()> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(IsosError::InvalidInput(format!(
            "Coordinates must be finite, got: ({}, {})",
            lat, lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(IsosError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(IsosError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    Ok(())
}

/// A selectable object: identifier, position, and precomputed popularity
/// weight in `[0, 1)`.
///
/// Immutable for the duration of one selection call. The weight is supplied
/// by the data layer; [`SpatialObject::weight_from_visitor_count`] implements
/// the standard derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialObject {
    pub id: ObjectId,
    pub lat: f64,
    pub lon: f64,
    pub weight: f64,
}

impl SpatialObject {
    /// Create a validated spatial object.
    ///
    /// # Errors
    ///
    /// Returns [`IsosError::InvalidInput`] if the coordinates are out of
    /// range or the weight falls outside `[0, 1)`.
    pub fn new(id: ObjectId, lat: f64, lon: f64, weight: f64) -> Result<Self> {
        validate_coordinates(lat, lon)?;

        if !weight.is_finite() || !(0.0..1.0).contains(&weight) {
            return Err(IsosError::InvalidInput(format!(
                "Weight must be in [0, 1): {}",
                weight
            )));
        }

        Ok(Self {
            id,
            lat,
            lon,
            weight,
        })
    }

    /// Popularity weight from a raw visitor count: `n / (n + 10)`.
    ///
    /// Saturating in the visitor count, always strictly below 1.
    pub fn weight_from_visitor_count(n_visitors: usize) -> f64 {
        let n = n_visitors as f64;
        n / (n + 10.0)
    }

    /// Position as a `geo` point (x = longitude, y = latitude).
    pub fn position(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

/// A rectangular lat/lon viewport given by its bottom-left and top-right
/// corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
}

impl BoundingBox {
    /// Create a bounding box from `(lat, lon)` corner pairs.
    ///
    /// # Errors
    ///
    /// Returns [`IsosError::InvalidBoundingBox`] if either corner is out of
    /// geographic range or the corners are not strictly ordered
    /// (`south_west < north_east` on both axes).
    pub fn new(south_west: (f64, f64), north_east: (f64, f64)) -> Result<Self> {
        let (min_lat, min_lon) = south_west;
        let (max_lat, max_lon) = north_east;

        validate_coordinates(min_lat, min_lon)
            .and(validate_coordinates(max_lat, max_lon))
            .map_err(|e| IsosError::InvalidBoundingBox(e.to_string()))?;

        if min_lat >= max_lat {
            return Err(IsosError::InvalidBoundingBox(format!(
                "south-west latitude ({}) must be below north-east latitude ({})",
                min_lat, max_lat
            )));
        }
        if min_lon >= max_lon {
            return Err(IsosError::InvalidBoundingBox(format!(
                "south-west longitude ({}) must be west of north-east longitude ({})",
                min_lon, max_lon
            )));
        }

        Ok(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }

    /// Bottom-left corner as `(lat, lon)`.
    pub fn south_west(&self) -> (f64, f64) {
        (self.min_lat, self.min_lon)
    }

    /// Top-right corner as `(lat, lon)`.
    pub fn north_east(&self) -> (f64, f64) {
        (self.max_lat, self.max_lon)
    }

    /// Whether a coordinate lies inside the box, borders inclusive.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }

    /// Whether `other` lies strictly inside this box: both of its corners
    /// are interior points. Shared edges do not count.
    pub fn strictly_contains(&self, other: &BoundingBox) -> bool {
        self.min_lat < other.min_lat
            && other.max_lat < self.max_lat
            && self.min_lon < other.min_lon
            && other.max_lon < self.max_lon
    }

    /// Great-circle width of the viewport in kilometers, measured along the
    /// southern edge.
    pub fn width_km(&self) -> f64 {
        crate::metrics::haversine_km(self.min_lat, self.min_lon, self.min_lat, self.max_lon)
    }
}

/// Result of one selection call and the carry-over state for the next one.
///
/// `selected` are the markers to display, `hidden` the in-viewport objects
/// suppressed this round. The two are disjoint and together cover the
/// candidate pool that produced them. The engine never stores this: the
/// caller persists it and passes it back on the next interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub selected: Vec<ObjectId>,
    pub hidden: Vec<ObjectId>,
}

impl Selection {
    /// The state before the first interaction: nothing shown, nothing hidden.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.hidden.is_empty()
    }
}

/// Engine configuration.
///
/// Serializable with per-field defaults so it can be loaded from JSON:
///
/// ```rust
/// use isos::SelectionConfig;
///
/// let config: SelectionConfig = serde_json::from_str(r#"{"separation_fraction": 0.15}"#).unwrap();
/// assert_eq!(config.separation_fraction, 0.15);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Fraction of the viewport's horizontal great-circle width used as the
    /// minimum distance between two markers selected in the same call.
    #[serde(default = "SelectionConfig::default_separation_fraction")]
    pub separation_fraction: f64,

    /// Hard cap on the candidate pool size. Guards against pathological
    /// viewports triggering quadratic blow-up in gain initialization.
    #[serde(default = "SelectionConfig::default_max_candidates")]
    pub max_candidates: usize,
}

impl SelectionConfig {
    const fn default_separation_fraction() -> f64 {
        0.1
    }

    const fn default_max_candidates() -> usize {
        50_000
    }

    pub fn with_separation_fraction(mut self, fraction: f64) -> Self {
        assert!(
            (0.0..1.0).contains(&fraction),
            "Separation fraction must be in [0, 1)"
        );
        self.separation_fraction = fraction;
        self
    }

    pub fn with_max_candidates(mut self, cap: usize) -> Self {
        assert!(cap > 0, "Candidate cap must be greater than zero");
        self.max_candidates = cap;
        self
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            separation_fraction: Self::default_separation_fraction(),
            max_candidates: Self::default_max_candidates(),
        }
    }
}
