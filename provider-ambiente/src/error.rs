//! Error types for the ministry API provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Ministry API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connectivity failure before any HTTP status was produced
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Request { status: u16, message: String },

    /// Transport-level failure that is not a connectivity problem
    #[error(transparent)]
    Bridge(BridgeError),
}

impl ApiError {
    /// Whether the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Request { status: 401, .. })
    }
}

impl From<BridgeError> for ApiError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::Network(msg) => ApiError::Network(msg),
            other => ApiError::Bridge(other),
        }
    }
}

/// Result type for ministry API operations
pub type Result<T> = std::result::Result<T, ApiError>;
