//! Account operations: authentication, registration, password recovery.

use std::sync::Arc;

use core_runtime::logging::redact_if_sensitive;
use core_session::{Identity, Session, SessionManager};
use provider_ambiente::{AmbienteConnector, Registration, VolunteerSignup};
use tracing::{info, instrument};

use crate::auth::AuthGate;
use crate::error::Result;

/// Login, logout, registration and password recovery against the ministry
/// API, with session state kept by [`SessionManager`].
#[derive(Clone)]
pub struct AccountService {
    connector: AmbienteConnector,
    session: Arc<SessionManager>,
    gate: AuthGate,
}

impl AccountService {
    pub(crate) fn new(connector: AmbienteConnector, session: Arc<SessionManager>) -> Self {
        let gate = AuthGate::new(Arc::clone(&session));
        Self {
            connector,
            session,
            gate,
        }
    }

    /// Restores a persisted session, if any. Called once at startup; never
    /// fails, a missing or unreadable session simply starts signed out.
    pub async fn restore(&self) -> Session {
        self.session.check_persisted().await
    }

    /// Authenticates against the API and persists the resulting session.
    ///
    /// On success every subsequent reader observes the new session; on any
    /// failure the previous state is unchanged.
    #[instrument(
        skip(self, email, password),
        fields(email = %redact_if_sensitive("email", email))
    )]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let user = self.connector.login(email, password).await?;
        let session = self
            .session
            .login(Identity::new(user.name, user.email), user.token)
            .await?;
        Ok(session)
    }

    /// Clears the persisted and in-memory session. Logging out while
    /// signed out is a no-op success.
    pub async fn logout(&self) -> Result<()> {
        self.session.logout().await?;
        Ok(())
    }

    /// The current in-memory session.
    pub async fn current_session(&self) -> Session {
        self.session.current().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    /// Creates a ministry account. The user still logs in separately.
    pub async fn register(&self, form: &Registration) -> Result<()> {
        self.connector.register(form).await?;
        Ok(())
    }

    /// Signs up a volunteer.
    pub async fn register_volunteer(&self, form: &VolunteerSignup) -> Result<()> {
        self.connector.register_volunteer(form).await?;
        Ok(())
    }

    /// Starts password recovery for an email. The returned code, when the
    /// server provides one, pre-fills the change-password form.
    pub async fn recover_password(&self, email: &str) -> Result<Option<String>> {
        self.connector.recover_password(email).await.map_err(Into::into)
    }

    /// Completes a password change with the recovery code. Requires an
    /// authenticated session.
    pub async fn change_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<()> {
        let token = self.gate.bearer().await?;
        let result = self
            .connector
            .change_password(email, code, new_password, &token)
            .await;
        self.gate.recover(result).await?;
        info!("Password change completed");
        Ok(())
    }
}
