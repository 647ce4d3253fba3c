//! # Core Configuration
//!
//! Builder-constructed [`CoreConfig`] carrying everything the facade needs:
//! the API base URL override, the bridge handles, and event-bus sizing.
//! Validation is fail-fast; a config that cannot support the core is
//! rejected at build time with a message naming the missing piece.
//!
//! `SecureStore` is the only hard requirement, since sessions must persist.
//! The HTTP client falls back to the desktop default when the
//! `desktop-shims` feature is on; the capture bridges (`Geolocator`,
//! `MediaPicker`) are optional and their absence only disables report
//! capture.
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .api_base_url("https://staging.example.com/medioambiente")
//!     .secure_store(Arc::new(MySecureStore))
//!     .geolocator(Arc::new(MyGeolocator))
//!     .media_picker(Arc::new(MyMediaPicker))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{Geolocator, HttpClient, MediaPicker, SecureStore};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Largest accepted event-bus buffer. Catches configs that confuse the
/// buffer size with a byte count.
const MAX_EVENT_BUFFER_SIZE: usize = 10_000;

/// Dependencies and settings for the core, built via [`CoreConfig::builder`].
#[derive(Clone)]
pub struct CoreConfig {
    /// Base URL of the ministry API. `None` uses the production endpoint.
    pub api_base_url: Option<String>,

    /// HTTP transport. `None` defers to the desktop default at facade
    /// construction.
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Credential persistence. Always present.
    pub secure_store: Arc<dyn SecureStore>,

    /// Device position source for report drafts.
    pub geolocator: Option<Arc<dyn Geolocator>>,

    /// Photo source for report drafts.
    pub media_picker: Option<Arc<dyn MediaPicker>>,

    /// Buffer size of the event bus channel.
    pub event_buffer_size: usize,
}

// Bridge handles have no useful Debug output; log their presence only.
impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_base_url", &self.api_base_url)
            .field("has_http_client", &self.http_client.is_some())
            .field("has_geolocator", &self.geolocator.is_some())
            .field("has_media_picker", &self.media_picker.is_some())
            .field("event_buffer_size", &self.event_buffer_size)
            .finish_non_exhaustive()
    }
}

impl CoreConfig {
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Checks the value-level invariants.
    ///
    /// The base URL override must parse as an http(s) URL, and the event
    /// buffer must hold at least one event without being absurdly large.
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = self.api_base_url.as_deref() {
            if base_url.is_empty() {
                return Err(Error::Config("API base URL cannot be empty".to_string()));
            }

            let parsed = Url::parse(base_url)
                .map_err(|e| Error::Config(format!("API base URL is invalid: {}", e)))?;

            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "API base URL must use http or https, got '{}'",
                    parsed.scheme()
                )));
            }
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        if self.event_buffer_size > MAX_EVENT_BUFFER_SIZE {
            return Err(Error::Config(format!(
                "Event buffer size exceeds maximum of {}",
                MAX_EVENT_BUFFER_SIZE
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "desktop-shims")]
fn default_secure_store() -> Result<Arc<dyn SecureStore>> {
    Ok(Arc::new(bridge_desktop::KeyringSecureStore::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn default_secure_store() -> Result<Arc<dyn SecureStore>> {
    Err(Error::CapabilityMissing {
        capability: "SecureStore".to_string(),
        message: "SecureStore implementation is required for session persistence. \
                 Desktop: enable the 'desktop-shims' feature to use the default KeyringSecureStore. \
                 Mobile: inject platform-native secure storage (Keychain/Keystore)."
            .to_string(),
    })
}

/// Incremental builder for [`CoreConfig`].
#[derive(Default)]
pub struct CoreConfigBuilder {
    api_base_url: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    secure_store: Option<Arc<dyn SecureStore>>,
    geolocator: Option<Arc<dyn Geolocator>>,
    media_picker: Option<Arc<dyn MediaPicker>>,
    event_buffer_size: Option<usize>,
}

impl CoreConfigBuilder {
    /// Overrides the ministry API base URL. A trailing slash is trimmed.
    pub fn api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(base_url.into());
        self
    }

    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the credential store backing session persistence.
    pub fn secure_store(mut self, store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(store);
        self
    }

    /// Sets the position source used when drafting reports. Without one,
    /// position capture fails with an actionable error.
    pub fn geolocator(mut self, geolocator: Arc<dyn Geolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    /// Sets the photo source used when drafting reports. Without one, photo
    /// capture fails with an actionable error.
    pub fn media_picker(mut self, picker: Arc<dyn MediaPicker>) -> Self {
        self.media_picker = Some(picker);
        self
    }

    /// Sets how many events each subscriber may buffer before lagging.
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Finishes the config, filling defaults and validating.
    ///
    /// # Errors
    ///
    /// `Error::CapabilityMissing` when no `SecureStore` was provided and no
    /// desktop default is available, or `Error::Config` when a value fails
    /// [`CoreConfig::validate`].
    pub fn build(self) -> Result<CoreConfig> {
        let secure_store = match self.secure_store {
            Some(store) => store,
            None => default_secure_store()?,
        };

        let config = CoreConfig {
            api_base_url: self
                .api_base_url
                .map(|base_url| base_url.trim_end_matches('/').to_string()),
            http_client: self.http_client,
            secure_store,
            geolocator: self.geolocator,
            media_picker: self.media_picker,
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}
