//! # Host Bridge Traits
//!
//! The contract between the portable core and whatever host embeds it.
//! Each trait is one capability the core needs but cannot implement
//! portably; desktop ships adapters in `bridge-desktop`, mobile hosts
//! inject their own (Keychain/Keystore, CoreLocation/FusedLocation, and
//! so on).
//!
//! - [`HttpClient`](http::HttpClient): async HTTP with bearer auth, JSON
//!   and multipart bodies
//! - [`SecureStore`](storage::SecureStore): credential persistence
//! - [`Geolocator`](geolocation::Geolocator): device position for report
//!   drafts
//! - [`MediaPicker`](media::MediaPicker): photo acquisition from camera
//!   or gallery
//! - [`Clock`](time::Clock) and [`LoggerSink`](time::LoggerSink): time
//!   source and host log forwarding
//!
//! Every trait is `Send + Sync` and async-first via `async_trait`, and
//! every fallible operation returns [`BridgeError`](error::BridgeError).
//! Adapters are expected to classify failures rather than stringify them:
//! connectivity problems as `BridgeError::Network`, user refusals as
//! `PermissionDenied` or `Cancelled`, so the layers above can choose user
//! messages without parsing text.
//!
//! ```ignore
//! use async_trait::async_trait;
//! use bridge_traits::error::Result;
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//!
//! pub struct HostHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for HostHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         // translate, send, classify errors
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod geolocation;
pub mod http;
pub mod media;
pub mod storage;
pub mod time;

pub use error::BridgeError;

pub use geolocation::{Coordinates, Geolocator};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, MultipartPart};
pub use media::{CapturedPhoto, MediaPicker, PhotoSource};
pub use storage::SecureStore;
pub use time::{Clock, LogEntry, LogLevel, LoggerSink, SystemClock};
