//! Report operations: listing the caller's reports, draft capture helpers
//! and submission.

use std::sync::Arc;

use bridge_traits::error::BridgeError;
use bridge_traits::media::PhotoSource;
use core_report::{CaptureService, SubmissionDraft};
use core_runtime::events::{CoreEvent, EventBus, ReportEvent};
use core_session::SessionManager;
use provider_ambiente::normalize;
use provider_ambiente::{AmbienteConnector, Report};
use tracing::instrument;

use crate::auth::AuthGate;
use crate::error::{Result, ServiceError};

const CAPTURE_UNAVAILABLE: &str =
    "report capture requires the Geolocator and MediaPicker bridges";

/// Protected report operations plus the capture side of draft assembly.
///
/// Capture is available only when the host configured both a `Geolocator`
/// and a `MediaPicker`; otherwise the attach operations fail with an
/// actionable capability error and everything else still works.
#[derive(Clone)]
pub struct ReportsService {
    connector: AmbienteConnector,
    gate: AuthGate,
    capture: Option<CaptureService>,
    event_bus: EventBus,
}

impl ReportsService {
    pub(crate) fn new(
        connector: AmbienteConnector,
        session: Arc<SessionManager>,
        capture: Option<CaptureService>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            connector,
            gate: AuthGate::new(session),
            capture,
            event_bus,
        }
    }

    /// The caller's submitted reports, in server order.
    pub async fn my_reports(&self) -> Result<Vec<Report>> {
        let token = self.gate.bearer().await?;
        let result = self.connector.reports(&token).await;
        self.gate.recover(result).await
    }

    /// The caller's reports carrying finite coordinates, for the map view.
    pub async fn my_plottable_reports(&self) -> Result<Vec<Report>> {
        let reports = self.my_reports().await?;
        Ok(normalize::plottable_reports(&reports))
    }

    /// An empty draft for the host form to fill in.
    pub fn new_draft(&self) -> SubmissionDraft {
        SubmissionDraft::new()
    }

    fn capture(&self) -> Result<&CaptureService> {
        self.capture.as_ref().ok_or_else(|| {
            ServiceError::Capability(BridgeError::NotAvailable(CAPTURE_UNAVAILABLE.to_string()))
        })
    }

    /// Acquires the device position into the draft.
    pub async fn attach_position(&self, draft: &mut SubmissionDraft) -> Result<()> {
        self.capture()?.attach_position(draft).await?;
        Ok(())
    }

    /// Acquires a photo into the draft.
    pub async fn attach_photo(
        &self,
        draft: &mut SubmissionDraft,
        source: PhotoSource,
    ) -> Result<()> {
        self.capture()?.attach_photo(draft, source).await?;
        Ok(())
    }

    /// Validates and submits a draft as JSON. Returns the server-assigned
    /// tracking code when the response carries one.
    ///
    /// An invalid draft fails before the guard and the transport; hosts
    /// normally surface [`SubmissionDraft::validate`] results beforehand.
    #[instrument(skip(self, draft))]
    pub async fn submit(&self, draft: &SubmissionDraft) -> Result<Option<String>> {
        let payload = draft.to_payload()?;
        let token = self.gate.bearer().await?;
        let result = self.connector.submit_report(&token, &payload.to_json()).await;
        self.emit_outcome(self.gate.recover(result).await)
    }

    /// Validates and submits a draft as a multipart form, for servers that
    /// reject large base64 photo payloads.
    #[instrument(skip(self, draft))]
    pub async fn submit_multipart(&self, draft: &SubmissionDraft) -> Result<Option<String>> {
        let form = draft.to_payload()?.to_multipart()?;
        let token = self.gate.bearer().await?;
        let result = self.connector.submit_report_multipart(&token, form).await;
        self.emit_outcome(self.gate.recover(result).await)
    }

    fn emit_outcome(&self, outcome: Result<Option<String>>) -> Result<Option<String>> {
        match outcome {
            Ok(code) => {
                let _ = self
                    .event_bus
                    .emit(CoreEvent::Report(ReportEvent::Submitted { code: code.clone() }));
                Ok(code)
            }
            Err(err) => {
                let _ = self.event_bus.emit(CoreEvent::Report(ReportEvent::SubmitFailed {
                    message: err.user_message(),
                }));
                Err(err)
            }
        }
    }
}
