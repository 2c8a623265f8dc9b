//! Error types for the roster crate.

use roster_seeker::SeekerError;
use thiserror::Error;

/// Errors returned by the data service and its helpers.
///
/// Every variant is a caller mistake or an encoding failure; nothing here is
/// transient, so there is no retry story.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Field name outside the closed set of user fields.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// Export format other than `json` or `csv`.
    #[error("unsupported export format '{0}' (expected json or csv)")]
    UnsupportedFormat(String),

    /// Argument outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Service configuration could not be loaded or is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Seeker(#[from] SeekerError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
