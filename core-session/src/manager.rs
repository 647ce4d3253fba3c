//! # Session Manager
//!
//! Single writer for the process-wide session state.
//!
//! ## Overview
//!
//! The `SessionManager` owns the in-memory [`Session`] behind a `RwLock`,
//! persists transitions through [`SessionStore`], and announces them on the
//! shared [`EventBus`] so host UIs can react without polling. Every other
//! component reads session state through this type; the only writers are
//! the explicit `check_persisted`, `login`, `logout` and `expire` flows.
//!
//! ## Lifecycle
//!
//! ```text
//! process start ──► check_persisted() ──► authenticated or anonymous
//! sign-in form ──► login(identity, token) ──► authenticated, SignedIn event
//! sign-out     ──► logout() ──► anonymous, SignedOut event
//! HTTP 401     ──► expire() ──► anonymous, Expired event
//! ```
//!
//! ## Usage
//!
//! ```
//! use core_session::{Identity, SessionManager};
//! use core_runtime::events::EventBus;
//! use std::sync::Arc;
//! # use bridge_traits::error::Result as BridgeResult;
//! # use bridge_traits::SecureStore;
//! # use std::collections::HashMap;
//! # use tokio::sync::Mutex;
//! # #[derive(Default)]
//! # struct MockSecureStore {
//! #     storage: Mutex<HashMap<String, Vec<u8>>>,
//! # }
//! # #[async_trait::async_trait]
//! # impl SecureStore for MockSecureStore {
//! #     async fn set_secret(&self, key: &str, value: &[u8]) -> BridgeResult<()> {
//! #         self.storage.lock().await.insert(key.to_string(), value.to_vec());
//! #         Ok(())
//! #     }
//! #     async fn get_secret(&self, key: &str) -> BridgeResult<Option<Vec<u8>>> {
//! #         Ok(self.storage.lock().await.get(key).cloned())
//! #     }
//! #     async fn delete_secret(&self, key: &str) -> BridgeResult<()> {
//! #         self.storage.lock().await.remove(key);
//! #         Ok(())
//! #     }
//! # }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let event_bus = EventBus::new(100);
//! let manager = SessionManager::new(Arc::new(MockSecureStore::default()), event_bus);
//!
//! // Process start: nothing persisted yet.
//! let session = manager.check_persisted().await;
//! assert!(!session.is_authenticated());
//!
//! // Successful sign-in.
//! manager
//!     .login(Identity::new("Ana", "ana@example.com"), "token-abc")
//!     .await?;
//! assert!(manager.current().await.is_authenticated());
//!
//! manager.logout().await?;
//! assert!(!manager.current().await.is_authenticated());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SessionError};
use crate::guard::Access;
use crate::store::SessionStore;
use crate::types::{Identity, Session};
use bridge_traits::SecureStore;
use core_runtime::events::{CoreEvent, EventBus, SessionEvent};
use core_runtime::logging::redact_if_sensitive;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Orchestrates session state, persistence and event emission.
pub struct SessionManager {
    /// Durable storage for the session
    store: SessionStore,
    /// In-memory session observed by every reader
    current: Arc<RwLock<Session>>,
    /// Event bus for announcing session transitions
    event_bus: EventBus,
}

impl SessionManager {
    /// Creates a new session manager.
    ///
    /// The in-memory session starts anonymous; call [`check_persisted`]
    /// once at process start to pick up a stored session.
    ///
    /// [`check_persisted`]: SessionManager::check_persisted
    pub fn new(secure_store: Arc<dyn SecureStore>, event_bus: EventBus) -> Self {
        Self {
            store: SessionStore::new(secure_store),
            current: Arc::new(RwLock::new(Session::anonymous())),
            event_bus,
        }
    }

    /// Restores a persisted session into memory, if one exists.
    ///
    /// Never fails the caller: a storage read error is logged and treated
    /// as "no session". Emits [`SessionEvent::Restored`] when a session
    /// was recovered.
    #[instrument(skip(self))]
    pub async fn check_persisted(&self) -> Session {
        debug!("Checking for persisted session");

        match self.store.restore().await {
            Ok(Some(session)) => {
                {
                    let mut current = self.current.write().await;
                    *current = session.clone();
                }

                let email = session
                    .identity()
                    .map(|i| i.email.clone())
                    .unwrap_or_default();
                let event = CoreEvent::Session(SessionEvent::Restored {
                    email: email.clone(),
                });
                let _ = self.event_bus.emit(event);

                info!(
                    email = %redact_if_sensitive("email", &email),
                    "Persisted session restored"
                );
                session
            }
            Ok(None) => {
                debug!("No persisted session, starting anonymous");
                Session::anonymous()
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted session, starting anonymous");
                Session::anonymous()
            }
        }
    }

    /// Signs in: persists the session, then installs it in memory.
    ///
    /// Atomic from the caller's perspective: on any failure the previous
    /// in-memory state is left unchanged and no event fires. Emits
    /// [`SessionEvent::SignedIn`] on success.
    ///
    /// # Errors
    ///
    /// - [`SessionError::LoginRejected`] if `token` is empty
    /// - [`SessionError::StorageUnavailable`] if persistence fails
    #[instrument(skip(self, identity, token))]
    pub async fn login(&self, identity: Identity, token: impl Into<String>) -> Result<Session> {
        let token = token.into();
        if token.is_empty() {
            warn!("Rejected sign-in with empty token");
            return Err(SessionError::LoginRejected(
                "empty bearer token".to_string(),
            ));
        }

        info!(
            email = %redact_if_sensitive("email", &identity.email),
            "Signing in"
        );

        // Persist before touching memory so a storage failure leaves the
        // previous state observable.
        self.store.persist(&identity, &token).await.map_err(|e| {
            error!(error = %e, "Failed to persist session");
            e
        })?;

        let session = Session::authenticated(identity, token);
        {
            let mut current = self.current.write().await;
            *current = session.clone();
        }

        let email = session
            .identity()
            .map(|i| i.email.clone())
            .unwrap_or_default();
        let event = CoreEvent::Session(SessionEvent::SignedIn { email });
        let _ = self.event_bus.emit(event);

        info!("Sign-in completed");
        Ok(session)
    }

    /// Signs out: removes the persisted session and clears memory.
    ///
    /// Idempotent; signing out while anonymous is a no-op success and
    /// emits nothing. Emits [`SessionEvent::SignedOut`] otherwise.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        debug!("Signing out");

        self.store.clear().await.map_err(|e| {
            error!(error = %e, "Failed to clear persisted session");
            e
        })?;

        let was_authenticated = {
            let mut current = self.current.write().await;
            let was = current.is_authenticated();
            *current = Session::anonymous();
            was
        };

        if was_authenticated {
            let _ = self
                .event_bus
                .emit(CoreEvent::Session(SessionEvent::SignedOut));
            info!("Sign-out completed");
        }
        Ok(())
    }

    /// Drops the session after the server rejected its token.
    ///
    /// Unlike [`logout`], this never fails: memory is cleared even when
    /// the persisted copy cannot be removed, because the token is already
    /// known to be dead. Emits [`SessionEvent::Expired`].
    ///
    /// [`logout`]: SessionManager::logout
    #[instrument(skip(self))]
    pub async fn expire(&self) {
        warn!("Server rejected the session token, clearing credentials");

        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear persisted session after expiry");
        }

        {
            let mut current = self.current.write().await;
            *current = Session::anonymous();
        }

        let _ = self
            .event_bus
            .emit(CoreEvent::Session(SessionEvent::Expired));
    }

    /// A snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.current.read().await.clone()
    }

    /// Whether the current session is authenticated.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_authenticated()
    }

    /// The current bearer token, if authenticated.
    pub async fn bearer_token(&self) -> Option<String> {
        self.current.read().await.token().map(str::to_string)
    }

    /// Evaluates the access guard against the current session.
    pub async fn access(&self) -> Access {
        Access::evaluate(&*self.current.read().await)
    }
}

// ============================================================================
// Tests
// ============================================================================
