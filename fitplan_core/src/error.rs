//! Error types for the fitplan_core library.

use crate::Level;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A plan source could not produce candidates
    #[error("Plan source error: {0}")]
    Source(String),

    /// Plan selection did not yield a workout
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Recoverable outcomes of plan selection that produce no workout.
///
/// The selector returns these by value; callers turn them into
/// user-facing text and decide whether to retry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The (group, level) pair is not in the catalog
    #[error("no '{group}' workouts at {level} level yet")]
    CatalogMiss { group: String, level: Level },

    /// Candidates existed but none fit into the time budget
    #[error("could not fit any '{group}' exercise into {total_seconds} seconds")]
    NoFit {
        group: String,
        level: Level,
        total_seconds: u64,
    },
}

impl SelectionError {
    pub fn is_catalog_miss(&self) -> bool {
        matches!(self, SelectionError::CatalogMiss { .. })
    }

    pub fn is_no_fit(&self) -> bool {
        matches!(self, SelectionError::NoFit { .. })
    }
}
