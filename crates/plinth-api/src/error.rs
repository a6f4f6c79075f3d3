//! Error types for the API client

use thiserror::Error;

/// API client error
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Session rejected by the server; both tokens have been cleared
    #[error("Unauthorized")]
    Unauthorized,
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
