//! # Environmental Ministry API Provider
//!
//! Client for the environmental ministry's mobile API. The crate owns the
//! endpoint map, the wire conventions and all response normalization;
//! callers get canonical, strongly typed records and never touch raw JSON.
//!
//! The provider is deliberately stateless: tokens are accepted as arguments
//! on the calls that need them and are never stored here. Session handling
//! lives in `core-session`, orchestration in `core-service`.

pub mod client;
pub mod connector;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod normalize;

pub use client::ApiClient;
pub use connector::AmbienteConnector;
pub use error::{ApiError, Result};
pub use models::{
    AuthenticatedUser, Measure, NewsItem, ProtectedArea, Registration, Regulation, Report,
    ReportStatus, Service, TeamMember, Video, VolunteerSignup,
};
