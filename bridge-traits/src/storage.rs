//! Secure Storage Abstraction
//!
//! Platform-agnostic trait for the durable credential slots the session layer
//! needs: the serialized signed-in identity and the raw bearer token.

use async_trait::async_trait;

use crate::error::Result;

/// Key-value store backed by the platform credential vault: Keychain on
/// Apple platforms, Keystore on Android, DPAPI or Secret Service on
/// desktop.
///
/// Values are opaque bytes to the store. Implementations keep them
/// encrypted at rest, scoped to this application, and out of any log
/// output.
///
/// ```ignore
/// use bridge_traits::storage::SecureStore;
///
/// async fn remember_token(store: &dyn SecureStore, token: &str) -> Result<()> {
///     store.set_secret("auth_token", token.as_bytes()).await
/// }
/// ```
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Store a secret value under the given key, replacing any prior value.
    async fn set_secret(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Retrieve a secret value.
    ///
    /// Returns `Ok(None)` when no value is stored under the key. An `Err`
    /// means the store itself is unavailable, not that the key is absent.
    async fn get_secret(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Delete a secret value. Deleting an absent key is a no-op success.
    async fn delete_secret(&self, key: &str) -> Result<()>;

    /// Check whether a secret exists without reading it.
    async fn has_secret(&self, key: &str) -> Result<bool> {
        Ok(self.get_secret(key).await?.is_some())
    }
}
