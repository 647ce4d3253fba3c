//! # Desktop Bridge Adapters
//!
//! Concrete bridge implementations for desktop hosts: a real transport
//! and credential store, plus development shims for the two capture
//! capabilities only a phone can provide.
//!
//! - [`ReqwestHttpClient`]: `HttpClient` over reqwest
//! - [`KeyringSecureStore`]: `SecureStore` over the OS keychain
//!   (behind the default `secure-store` feature)
//! - [`StaticGeolocator`]: fixed-position `Geolocator`, desktops have
//!   no GPS
//! - [`FileMediaPicker`]: file-backed `MediaPicker`, desktops have no
//!   camera flow
//!
//! ```ignore
//! use bridge_desktop::{ReqwestHttpClient, StaticGeolocator};
//!
//! let http_client = ReqwestHttpClient::new()?;
//! let geolocator = StaticGeolocator::with_position(18.4861, -69.9312);
//! ```

mod geolocation;
mod http;
mod media;

#[cfg(feature = "secure-store")]
mod secure_store;

pub use geolocation::StaticGeolocator;
pub use http::ReqwestHttpClient;
pub use media::FileMediaPicker;

#[cfg(feature = "secure-store")]
pub use secure_store::KeyringSecureStore;
