//! Core error types for TokenHUD.

use thiserror::Error;

/// Core error type for TokenHUD operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller-supplied value was non-numeric or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Shorthand for building an [`CoreError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
