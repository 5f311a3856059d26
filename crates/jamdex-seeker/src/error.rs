//! Error types for the seeker crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading data or building clauses.
///
/// Filter compilation itself never fails: these surface only from the
/// fallible building blocks (regex construction, operator parsing) and from
/// dataset I/O.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Operator string not recognized by any property kind.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset file could not be read.
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
