//! Error types for the card store, scheduler and review sessions.
//!
//! Validation and range errors are raised before any state changes, so a
//! caller that sees one can assume the store is exactly as it was.

use thiserror::Error;

/// Errors produced by `leitner-core`.
#[derive(Debug, Error)]
pub enum LeitnerError {
    /// A required field was empty or used a reserved value.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A box index outside `0..=4`.
    #[error("box {0} is out of range (expected 0..=4)")]
    Range(i64),

    /// No card matches the given reference.
    #[error("card not found: {0}")]
    NotFound(String),

    /// A revision timestamp could not be parsed.
    #[error("invalid timestamp '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Reading or writing the durable collections failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A review session operation was called in the wrong state.
    #[error("session is {actual}, expected {expected}")]
    InvalidSessionState {
        expected: &'static str,
        actual: &'static str,
    },
}

impl LeitnerError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        LeitnerError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for LeitnerError {
    fn from(e: std::io::Error) -> Self {
        LeitnerError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for LeitnerError {
    fn from(e: serde_json::Error) -> Self {
        LeitnerError::Persistence(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LeitnerError>;
