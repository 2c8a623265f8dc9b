//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when building or executing queries.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Sort direction name that is neither ascending nor descending.
    #[error("unknown sort direction '{0}' (expected asc or desc)")]
    UnknownDirection(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
