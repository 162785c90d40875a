//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Error from the pixel container.
    #[error(transparent)]
    Core(#[from] retouch_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::InvalidParameter`] error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
