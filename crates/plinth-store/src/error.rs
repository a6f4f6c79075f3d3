//! Error types for store operations

use plinth_api::ApiError;
use thiserror::Error;

/// Store-level error surfaced to callers.
///
/// Failure messages stay generic; the underlying cause is logged, not
/// returned, so UI surfaces never leak transport or server detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The session was rejected; the user must sign in again
    #[error("Not authenticated")]
    Unauthorized,

    /// A guard rejected the input before any request was made
    #[error("{0}")]
    Invalid(String),

    /// The operation failed
    #[error("{0}")]
    Failed(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Collapse an API error into a caller-facing message, keeping the
    /// detail in the log.
    pub(crate) fn from_api(err: ApiError, message: &str) -> Self {
        match err {
            ApiError::Unauthorized => StoreError::Unauthorized,
            other => {
                tracing::warn!(error = %other, "{}", message);
                StoreError::Failed(message.to_string())
            }
        }
    }
}
