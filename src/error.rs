//! Error types for bounded random draws.

use std::time::Duration;
use thiserror::Error;

/// Boxed error used to carry an entropy source's own failure unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while constructing a generator or drawing values from it.
#[derive(Debug, Error)]
pub enum DrawError {
    /// Construction rejected the configuration bundle.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A single bounded draw lost its race against the clock.
    #[error("timeout after {elapsed:?} drawing below {bound}")]
    Timeout {
        /// The patience that ran out.
        elapsed: Duration,
        /// The exclusive upper bound of the abandoned draw.
        bound: u64,
    },

    /// The entropy source failed on its own; its error is kept as the cause.
    #[error("entropy source failed drawing below {bound}: {source}")]
    Source {
        /// The exclusive upper bound of the failed draw.
        bound: u64,
        /// The source's failure, passed through unchanged.
        #[source]
        source: BoxError,
    },

    /// An unexpected systemic condition. Not meant to be matched against.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

/// Result type for draw operations.
pub type DrawResult<T> = std::result::Result<T, DrawError>;

impl DrawError {
    /// Whether this error was raised rejecting a configuration bundle.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, DrawError::InvalidConfig(_))
    }

    /// Whether this error was raised by a draw losing its timeout race.
    pub fn is_timeout(&self) -> bool {
        matches!(self, DrawError::Timeout { .. })
    }
}
