//! Facade error surface.
//!
//! Every operation on the facade returns [`ServiceError`]. Lower-layer
//! failures convert upward via `From`; the one mapping with behavior
//! attached (HTTP 401 on an authenticated call becomes [`AuthExpired`]
//! after the session is cleared) lives in the auth gate, not here.
//!
//! [`AuthExpired`]: ServiceError::AuthExpired

use bridge_traits::error::BridgeError;
use core_report::ReportError;
use core_session::SessionError;
use provider_ambiente::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The API host could not be reached.
    #[error("Network unreachable: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// The server rejected the bearer token. The session has already been
    /// cleared when this surfaces; hosts redirect to the login entry point.
    #[error("Session expired")]
    AuthExpired,

    /// The operation needs an authenticated session and there is none.
    /// No network call was made.
    #[error("Not authenticated")]
    AccessDenied,

    /// A device capability refused: permission denied, user cancellation,
    /// or the capability is absent on this platform.
    #[error(transparent)]
    Capability(BridgeError),

    /// Session persistence failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The report draft is not submittable.
    #[error(transparent)]
    Draft(#[from] ReportError),

    /// The facade could not be constructed from the given configuration.
    #[error(transparent)]
    Setup(#[from] core_runtime::error::Error),
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) => ServiceError::Network(message),
            ApiError::Request { status, message } => ServiceError::Request { status, message },
            ApiError::Bridge(err) => ServiceError::Capability(err),
        }
    }
}

impl From<BridgeError> for ServiceError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Network(message) => ServiceError::Network(message),
            other => ServiceError::Capability(other),
        }
    }
}

impl ServiceError {
    /// Spanish message suitable for direct display.
    ///
    /// Server-provided messages pass through as-is; everything else maps to
    /// the fixed app copy.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Network(_) => "No hay conexión a internet".to_string(),
            ServiceError::AuthExpired => "Sesión expirada. Vuelve a iniciar sesión.".to_string(),
            ServiceError::Request { message, .. } => message.clone(),
            ServiceError::AccessDenied => "Debes iniciar sesión para continuar".to_string(),
            ServiceError::Capability(BridgeError::Cancelled) => "Operación cancelada".to_string(),
            ServiceError::Capability(BridgeError::PermissionDenied(_)) => {
                "Permiso denegado".to_string()
            }
            ServiceError::Draft(ReportError::Invalid(errors)) => errors
                .first()
                .map(|e| e.message.to_string())
                .unwrap_or_else(|| "Revisa los campos del formulario".to_string()),
            _ => "Ocurrió un error. Intenta de nuevo.".to_string(),
        }
    }

    /// True when the user dismissed a picker or prompt. Hosts typically
    /// show nothing for these.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ServiceError::Capability(BridgeError::Cancelled))
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
