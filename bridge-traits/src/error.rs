//! Error type shared by every bridge trait.
//!
//! Adapters classify failures into these variants instead of stringifying
//! them; the service layer maps each variant to a user-facing message.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// The capability has no implementation on this host.
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    /// The adapter ran but the underlying platform call failed.
    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    /// Connectivity failure, before any HTTP status was received.
    #[error("Network unreachable: {0}")]
    Network(String),

    /// The OS denied access (location permission, keychain access).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The user backed out of a picker or prompt.
    #[error("Operation cancelled by the user")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
