//! Store error types.

use std::path::PathBuf;

use thiserror::Error;
use tokenhud_core::CoreError;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The status record could not be located, opened or read in time.
    #[error("Status store unavailable at {}: {source}", .path.display())]
    StoreUnavailable {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The status record exists but is not a valid snapshot record.
    #[error("Malformed status record at {}: {reason}", .path.display())]
    StoreMalformed {
        /// Path that was read.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Caller input was rejected before anything was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if a later read might succeed.
    ///
    /// The poll loop holds its last snapshot for these.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::StoreUnavailable { .. } | StoreError::StoreMalformed { .. } | StoreError::Io(_)
        )
    }

    /// Returns true if the caller passed an invalid argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::InvalidArgument(_)))
    }
}
