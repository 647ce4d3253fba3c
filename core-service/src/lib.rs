//! # Ambiente Mobile Core Facade
//!
//! Wires host-provided bridges (HTTP, secure storage, geolocation, media
//! capture) into the three service surfaces host applications consume:
//! [`AccountService`], [`CatalogService`] and [`ReportsService`].
//!
//! Desktop apps typically enable the `desktop-shims` feature, which fills
//! in a reqwest-backed HTTP client and a keyring-backed secure store when
//! the host does not inject its own. Mobile hosts inject platform-native
//! bridges and build without default features.
//!
//! ## Usage
//!
//! ```ignore
//! use core_service::{CoreConfig, CoreService};
//!
//! let core = CoreService::new(CoreConfig::builder().build()?)?;
//! let session = core.start().await;
//!
//! let news = core.catalog().news().await?;
//! core.account().login("ana@example.com", "secret").await?;
//! let reports = core.reports().my_reports().await?;
//! ```

mod auth;

pub mod account;
pub mod catalog;
pub mod error;
pub mod reports;

pub use account::AccountService;
pub use catalog::CatalogService;
pub use error::{Result, ServiceError};
pub use reports::ReportsService;

// Host-facing types, re-exported so one dependency covers the whole API.
pub use bridge_traits::media::PhotoSource;
pub use core_report::{DraftField, FieldError, SubmissionDraft};
pub use core_runtime::config::{CoreConfig, CoreConfigBuilder};
pub use core_runtime::events::{CoreEvent, EventBus, Receiver, ReportEvent, SessionEvent};
pub use core_session::{Identity, Session};
pub use provider_ambiente::{
    Measure, NewsItem, ProtectedArea, Registration, Regulation, Report, ReportStatus, Service,
    TeamMember, Video, VolunteerSignup,
};

use std::sync::Arc;

use bridge_traits::http::HttpClient;
use core_report::CaptureService;
use core_session::SessionManager;
use provider_ambiente::AmbienteConnector;
use tracing::info;

#[cfg(feature = "desktop-shims")]
fn default_http_client() -> Result<Arc<dyn HttpClient>> {
    let client = bridge_desktop::ReqwestHttpClient::new()?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(ServiceError::Setup(
        core_runtime::error::Error::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: "HttpClient implementation is required for API access. \
                     Desktop: enable the 'desktop-shims' feature to use the default ReqwestHttpClient. \
                     Mobile: inject a platform-native HTTP stack."
                .to_string(),
        },
    ))
}

/// Primary facade exposed to host applications.
///
/// Construction is fail-fast: a configuration that cannot support the API
/// surface (no HTTP client and no desktop default) is rejected here, not
/// at first use.
#[derive(Clone)]
pub struct CoreService {
    account: AccountService,
    catalog: CatalogService,
    reports: ReportsService,
    event_bus: EventBus,
}

impl CoreService {
    pub fn new(config: CoreConfig) -> Result<Self> {
        config.validate()?;

        let http_client = match config.http_client.clone() {
            Some(client) => client,
            None => default_http_client()?,
        };

        let connector = match config.api_base_url.as_deref() {
            Some(base_url) => AmbienteConnector::new(http_client, base_url),
            None => AmbienteConnector::with_default_base_url(http_client),
        };

        let event_bus = EventBus::new(config.event_buffer_size);
        let session = Arc::new(SessionManager::new(
            config.secure_store.clone(),
            event_bus.clone(),
        ));

        // Capture needs both ends of the draft: a position and a photo.
        let capture = match (config.geolocator.clone(), config.media_picker.clone()) {
            (Some(geolocator), Some(media_picker)) => {
                Some(CaptureService::new(geolocator, media_picker))
            }
            _ => None,
        };

        info!(
            base_url = connector.base_url(),
            capture = capture.is_some(),
            "Core initialized"
        );

        Ok(Self {
            account: AccountService::new(connector.clone(), Arc::clone(&session)),
            catalog: CatalogService::new(connector.clone(), Arc::clone(&session)),
            reports: ReportsService::new(connector, session, capture, event_bus.clone()),
            event_bus,
        })
    }

    /// Restores any persisted session. Hosts call this once at startup and
    /// route to the main or login screen based on the result.
    pub async fn start(&self) -> Session {
        self.account.restore().await
    }

    pub fn account(&self) -> &AccountService {
        &self.account
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn reports(&self) -> &ReportsService {
        &self.reports
    }

    /// Subscribes to core events (session transitions, report outcomes).
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.event_bus.subscribe()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
