//! Error types for session operations.

use thiserror::Error;

/// Errors that can occur during session operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// Login was rejected before any state changed
    #[error("Login rejected: {0}")]
    LoginRejected(String),

    /// Secure storage is unavailable or failed
    #[error("Secure storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Persisted session data could not be decoded
    #[error("Stored session corrupted: {0}")]
    CorruptedData(String),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
