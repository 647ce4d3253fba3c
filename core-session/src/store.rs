//! # Session Persistence
//!
//! Durable storage for the authenticated session over the platform
//! [`SecureStore`] bridge.
//!
//! ## Overview
//!
//! Two fixed slots are used:
//!
//! - `user` holds the serialized identity including the bearer token
//! - `auth_token` holds the raw bearer token bytes
//!
//! Restore trusts only the `user` slot, which is written last during a
//! persist and removed first during a clear. An interrupted persist
//! therefore leaves the previous session restorable, and an interrupted
//! clear cannot leave a restorable session behind; the worst case either
//! way is a stale `auth_token` slot that the next persist or clear
//! rewrites.
//!
//! ## Security
//!
//! The token is stored only in the platform secure store (Keychain,
//! keyring, encrypted shared preferences). It never appears in log output;
//! log lines carry the redacted email at most.
//!
//! ## Usage
//!
//! ```
//! use core_session::{Identity, SessionStore};
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
//! let store = SessionStore::new(Arc::new(MockSecureStore::default()));
//!
//! store
//!     .persist(&Identity::new("Ana", "ana@example.com"), "token-abc")
//!     .await?;
//!
//! let restored = store.restore().await?;
//! assert!(restored.is_some_and(|s| s.is_authenticated()));
//!
//! store.clear().await?;
//! assert!(store.restore().await?.is_none());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SessionError};
use crate::types::{Identity, Session};
use bridge_traits::SecureStore;
use core_runtime::logging::redact_if_sensitive;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Slot holding the serialized identity including the token.
const IDENTITY_KEY: &str = "user";

/// Slot holding the raw bearer token bytes.
const TOKEN_KEY: &str = "auth_token";

/// On-disk representation of an authenticated session.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    name: String,
    email: String,
    token: String,
}

/// Persists and restores the session through the platform secure store.
#[derive(Clone)]
pub struct SessionStore {
    secure_store: Arc<dyn SecureStore>,
}

impl SessionStore {
    /// Creates a new session store backed by `secure_store`.
    pub fn new(secure_store: Arc<dyn SecureStore>) -> Self {
        debug!("Initializing SessionStore");
        Self { secure_store }
    }

    /// Persists `identity` and `token` to durable storage.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StorageUnavailable`] if the secure store
    /// rejects a write; the previously persisted session stays restorable.
    pub async fn persist(&self, identity: &Identity, token: &str) -> Result<()> {
        debug!("Persisting session");

        let stored = StoredSession {
            name: identity.name.clone(),
            email: identity.email.clone(),
            token: token.to_string(),
        };
        let data = serde_json::to_vec(&stored)
            .map_err(|e| SessionError::StorageUnavailable(format!("serialize session: {e}")))?;

        // Raw token slot first; the identity slot restore trusts goes last.
        self.secure_store
            .set_secret(TOKEN_KEY, token.as_bytes())
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to write token slot");
                SessionError::StorageUnavailable(e.to_string())
            })?;
        self.secure_store
            .set_secret(IDENTITY_KEY, &data)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to write identity slot");
                SessionError::StorageUnavailable(e.to_string())
            })?;

        info!(
            email = %redact_if_sensitive("email", &identity.email),
            "Session persisted"
        );
        Ok(())
    }

    /// Restores the persisted session, if any.
    ///
    /// Returns `Ok(None)` when nothing is stored. A record that cannot be
    /// decoded is removed and reported as [`SessionError::CorruptedData`];
    /// a record without a token cannot back an authenticated session and is
    /// dropped as if absent.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let data = self
            .secure_store
            .get_secret(IDENTITY_KEY)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to read persisted session");
                SessionError::StorageUnavailable(e.to_string())
            })?;

        let Some(data) = data else {
            debug!("No persisted session found");
            return Ok(None);
        };

        let stored: StoredSession = match serde_json::from_slice(&data) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Persisted session is corrupted, removing it");
                self.remove_slots().await;
                return Err(SessionError::CorruptedData(e.to_string()));
            }
        };

        if stored.token.is_empty() {
            warn!("Persisted session has no token, removing it");
            self.remove_slots().await;
            return Ok(None);
        }

        info!(
            email = %redact_if_sensitive("email", &stored.email),
            "Persisted session restored"
        );
        Ok(Some(Session::authenticated(
            Identity::new(stored.name, stored.email),
            stored.token,
        )))
    }

    /// Removes the persisted session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StorageUnavailable`] if the secure store
    /// rejects a delete.
    pub async fn clear(&self) -> Result<()> {
        debug!("Clearing persisted session");

        // Identity slot first so an interrupted clear is not restorable.
        self.secure_store
            .delete_secret(IDENTITY_KEY)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete identity slot");
                SessionError::StorageUnavailable(e.to_string())
            })?;
        self.secure_store
            .delete_secret(TOKEN_KEY)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete token slot");
                SessionError::StorageUnavailable(e.to_string())
            })?;

        info!("Persisted session cleared");
        Ok(())
    }

    /// Whether a persisted session exists.
    pub async fn has_session(&self) -> Result<bool> {
        self.secure_store
            .has_secret(IDENTITY_KEY)
            .await
            .map_err(|e| SessionError::StorageUnavailable(e.to_string()))
    }

    /// Best-effort removal of both slots.
    async fn remove_slots(&self) {
        if let Err(e) = self.secure_store.delete_secret(IDENTITY_KEY).await {
            warn!(error = %e, "Failed to delete corrupted identity slot");
        }
        if let Err(e) = self.secure_store.delete_secret(TOKEN_KEY).await {
            warn!(error = %e, "Failed to delete corrupted token slot");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
