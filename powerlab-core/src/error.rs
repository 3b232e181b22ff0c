//! Structured error types for the powerlab crates.

use thiserror::Error;

/// Unified error type for all powerlab operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PowerError {
    /// A parameter is outside its valid domain (alpha ≥ 1, r² ≤ 0, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A distribution evaluation produced an infinite or undefined value.
    #[error("non-finite result: {0}")]
    NonFinite(String),

    /// Parse error (malformed JSON or parameter text)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience alias used throughout the powerlab crates.
pub type Result<T> = std::result::Result<T, PowerError>;
