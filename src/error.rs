//! Error types for the ISOS engine.
//!
//! Every failure the engine can produce is locally recoverable: selection is
//! a deterministic pure function of its inputs, so callers fix the input and
//! retry rather than retrying blindly.

use thiserror::Error;

/// Errors returned by the selection engine and its components.
#[derive(Debug, Error)]
pub enum IsosError {
    /// Viewport corners are malformed or out of geographic range.
    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Input failed validation (coordinates, weights, configuration, pool size).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An object id has no entry in the visitor index.
    #[error("object {0} has no visitor index entry")]
    UnknownObject(u64),

    /// A similarity over an empty union was requested through the checked API.
    #[error("similarity is undefined for two empty visitor sets")]
    UndefinedSimilarity,

    /// The lazy priority queue was popped while empty.
    #[error("priority queue is empty")]
    EmptyQueue,
}

/// Result type alias using [`IsosError`].
pub type Result<T> = std::result::Result<T, IsosError>;
