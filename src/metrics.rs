//! Set-similarity and great-circle distance primitives.
//!
//! These are the leaf functions everything else builds on: Jaccard and
//! overlap similarity over visitor sets, and haversine distance (in
//! kilometers) in single and bulk form. Distance calculations delegate to
//! the `geo` crate's `Haversine` metric.

use geo::{Distance, Haversine, Point};
use rustc_hash::FxHashSet;

use crate::error::{IsosError, Result};
use crate::types::UserId;

/// Jaccard similarity |A∩B| / |A∪B| between two visitor sets.
///
/// Policy for the empty union: the similarity of two empty sets is defined
/// as `0.0`. Two places nobody visited share no visitor pattern worth
/// crediting. Use [`jaccard_checked`] to surface the empty union as an
/// error instead.
pub fn jaccard(a: &FxHashSet<UserId>, b: &FxHashSet<UserId>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|v| large.contains(v)).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}

/// Jaccard similarity that reports the empty union as a typed failure.
///
/// # Errors
///
/// Returns [`IsosError::UndefinedSimilarity`] when both sets are empty.
pub fn jaccard_checked(a: &FxHashSet<UserId>, b: &FxHashSet<UserId>) -> Result<f64> {
    if a.is_empty() && b.is_empty() {
        return Err(IsosError::UndefinedSimilarity);
    }
    Ok(jaccard(a, b))
}

/// Overlap coefficient |A∩B| / min(|A|, |B|).
///
/// Used by friend-relevance ranking rather than by selection itself; kept
/// here so the similarity utilities live in one place. Returns `0.0` when
/// either set is empty.
pub fn overlap_coefficient(a: &FxHashSet<UserId>, b: &FxHashSet<UserId>) -> f64 {
    let min_len = a.len().min(b.len());
    if min_len == 0 {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|v| large.contains(v)).count();

    intersection as f64 / min_len as f64
}

/// Great-circle distance between two coordinates in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let p1 = Point::new(lon1, lat1);
    let p2 = Point::new(lon2, lat2);
    Haversine.distance(p1, p2) / 1000.0
}

/// Distances in kilometers from one reference point to a slice of
/// `(lat, lon)` coordinates.
///
/// Bulk form for distance tests against a whole candidate pool at once.
pub fn haversine_km_bulk(lat: f64, lon: f64, coords: &[(f64, f64)]) -> Vec<f64> {
    let reference = Point::new(lon, lat);
    coords
        .iter()
        .map(|&(other_lat, other_lon)| {
            Haversine.distance(reference, Point::new(other_lon, other_lat)) / 1000.0
        })
        .collect()
}
