//! Error types for wireframe reconstruction.

use thiserror::Error;

/// Why the clusters could not be bound to front/top/right roles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewAssignmentError {
    #[error("need at least 3 view clusters, found {found}")]
    TooFewClusters { found: usize },

    #[error("no cluster sits on both the most common min-x and min-y")]
    NoAnchor,

    #[error("no cluster above the front view shares its min-x")]
    MissingTop,

    #[error("no cluster right of the front view shares its min-y")]
    MissingRight,
}

/// Errors that stop a reconstruction run before anything is emitted.
#[derive(Error, Debug)]
pub enum ReconstructError {
    #[error("view assignment failed: {0}")]
    ViewAssignment(#[from] ViewAssignmentError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for reconstruction operations.
pub type Result<T> = std::result::Result<T, ReconstructError>;
