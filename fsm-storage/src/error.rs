//! Storage error types.
//!
//! Used by state storage implementations and their callers. Connectivity
//! failures of the networked backend are a distinct kind so callers can
//! decide retry/fallback policy instead of getting a silent fallback.

use thiserror::Error;

/// Errors that can occur when using state storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The networked backend could not be reached.
    #[error("State backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A stored value could not be encoded or decoded.
    #[error("State serialization error: {0}")]
    Serialization(String),

    /// Any other backend-reported failure.
    #[error("State backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
