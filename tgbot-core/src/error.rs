//! Gateway error taxonomy.
//!
//! Fatal kinds (config, rejected credentials) abort startup; transient
//! transport errors are retried by the polling loop; state-backend
//! unavailability is surfaced to the caller, never swallowed.

use fsm_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Invalid or missing configuration. Fatal before connecting.
    #[error("Config error: {0}")]
    Config(String),

    /// The messaging platform rejected our credentials. Fatal.
    #[error("Transport auth error: {0}")]
    TransportAuth(String),

    /// A transport failure worth retrying with backoff.
    #[error("Transport error: {0}")]
    TransportTransient(String),

    /// The networked state backend could not be reached.
    #[error("State backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Non-connectivity state storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Auxiliary API client failure.
    #[error("Api client error: {0}")]
    Api(String),

    /// A middleware was composed or invoked incorrectly. Distinct from a
    /// deliberate short-circuit, which is a control decision, not an error.
    #[error("Middleware error: {0}")]
    Middleware(String),

    /// A handler failed while processing one update.
    #[error("Handler error: {0}")]
    Handler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// True for errors that must stop the process rather than be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::TransportAuth(_))
    }
}

impl From<StorageError> for GatewayError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::BackendUnavailable(msg) => Self::BackendUnavailable(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
