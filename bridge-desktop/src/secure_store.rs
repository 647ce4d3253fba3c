//! Secure Credential Storage using the OS Keychain
//!
//! Backs the two session slots (serialized identity and raw bearer token)
//! with the platform credential store via the `keyring` crate: Keychain on
//! macOS, Credential Manager on Windows, Secret Service on Linux.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bridge_traits::{
    error::{BridgeError, Result},
    storage::SecureStore,
};
use keyring::Entry;
use tracing::debug;

const DEFAULT_SERVICE_NAME: &str = "ambiente-mobile-core";

/// `SecureStore` backed by the OS keychain.
///
/// Keychain entries hold strings, so values are base64-encoded on the way in
/// and decoded on the way out. Every key lives under one service name, which
/// keeps the app's credentials grouped in the host's keychain UI.
pub struct KeyringSecureStore {
    service_name: String,
}

impl KeyringSecureStore {
    pub fn new() -> Self {
        Self::with_service_name(DEFAULT_SERVICE_NAME)
    }

    /// Uses a custom service name, mainly to isolate test entries.
    pub fn with_service_name(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service_name, key).map_err(keychain_error)
    }
}

impl Default for KeyringSecureStore {
    fn default() -> Self {
        Self::new()
    }
}

fn keychain_error(err: keyring::Error) -> BridgeError {
    BridgeError::OperationFailed(format!("Keychain access failed: {err}"))
}

#[async_trait]
impl SecureStore for KeyringSecureStore {
    async fn set_secret(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entry(key)?
            .set_password(&STANDARD.encode(value))
            .map_err(keychain_error)?;

        debug!(key, "Stored secret in keychain");
        Ok(())
    }

    async fn get_secret(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.entry(key)?.get_password() {
            Ok(encoded) => {
                let value = STANDARD.decode(&encoded).map_err(|err| {
                    BridgeError::OperationFailed(format!(
                        "Keychain entry for '{key}' is not valid base64: {err}"
                    ))
                })?;
                debug!(key, "Read secret from keychain");
                Ok(Some(value))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(keychain_error(err)),
        }
    }

    async fn delete_secret(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            // Deleting a key that was never written is a no-op.
            Ok(()) | Err(keyring::Error::NoEntry) => {
                debug!(key, "Removed secret from keychain");
                Ok(())
            }
            Err(err) => Err(keychain_error(err)),
        }
    }

    async fn has_secret(&self, key: &str) -> Result<bool> {
        match self.entry(key)?.get_password() {
            Ok(_) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(err) => Err(keychain_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_names() {
        assert_eq!(KeyringSecureStore::new().service_name, DEFAULT_SERVICE_NAME);
        assert_eq!(
            KeyringSecureStore::with_service_name("amc-tests").service_name,
            "amc-tests"
        );
    }

    // Exercises the real keychain when one is present. Headless machines and
    // CI runners often have no usable backend; the write fails there and the
    // test has nothing to verify.
    #[tokio::test]
    async fn test_roundtrip_preserves_binary_values() {
        let store = KeyringSecureStore::with_service_name("amc-secure-store-test");
        let key = "roundtrip";
        let value: &[u8] = &[0x00, 0x9f, 0x92, 0x96];

        if store.set_secret(key, value).await.is_err() {
            return;
        }

        let read_back = store.get_secret(key).await;
        let _ = store.delete_secret(key).await;

        if let Ok(Some(bytes)) = read_back {
            assert_eq!(bytes, value);
        }
    }
}
