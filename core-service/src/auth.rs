//! The guard step shared by every protected operation.
//!
//! Protected calls go through [`AuthGate`] twice: `bearer()` before the
//! transport layer (a denied session short-circuits with zero network
//! calls) and `recover()` after it (an HTTP 401 clears the session exactly
//! once, here, and surfaces [`ServiceError::AuthExpired`]). There is no
//! silent retry.

use std::sync::Arc;

use core_session::{Access, SessionManager};
use tracing::warn;

use crate::error::{Result, ServiceError};

#[derive(Clone)]
pub(crate) struct AuthGate {
    session: Arc<SessionManager>,
}

impl AuthGate {
    pub(crate) fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    /// Evaluates the current session. `Denied` becomes
    /// [`ServiceError::AccessDenied`] before any request is built.
    pub(crate) async fn bearer(&self) -> Result<String> {
        match self.session.access().await {
            Access::Allowed(token) => Ok(token),
            Access::Denied(_) => Err(ServiceError::AccessDenied),
        }
    }

    /// Maps the outcome of an authenticated call. A 401 expires the
    /// session (persisted and in-memory) and becomes `AuthExpired`.
    pub(crate) async fn recover<T>(&self, result: provider_ambiente::Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) if err.is_unauthorized() => {
                warn!("Bearer token rejected by the server, expiring session");
                self.session.expire().await;
                Err(ServiceError::AuthExpired)
            }
            Err(err) => Err(err.into()),
        }
    }
}
