//! Capture orchestration for the submission draft.
//!
//! Position and photo acquisition are external, user-cancelable operations
//! owned by the host platform. This service wraps the two capabilities,
//! applies the one rule the contracts cannot express (a position fix must
//! be finite) and writes results into the draft. Failures propagate as
//! [`BridgeError`] so the facade can tell a cancellation from a denied
//! permission.

use std::sync::Arc;

use bridge_traits::error::{BridgeError, Result};
use bridge_traits::geolocation::{Coordinates, Geolocator};
use bridge_traits::media::{CapturedPhoto, MediaPicker, PhotoSource};
use core_runtime::logging::strip_path;
use tracing::{info, instrument, warn};

use crate::draft::SubmissionDraft;

/// Bundles the two capture capabilities a draft needs filled.
#[derive(Clone)]
pub struct CaptureService {
    geolocator: Arc<dyn Geolocator>,
    media_picker: Arc<dyn MediaPicker>,
}

impl CaptureService {
    pub fn new(geolocator: Arc<dyn Geolocator>, media_picker: Arc<dyn MediaPicker>) -> Self {
        Self {
            geolocator,
            media_picker,
        }
    }

    /// Acquires the current device position.
    ///
    /// A non-finite fix is reported as unavailable rather than handed to
    /// the draft, where it would fail validation with a misleading message.
    #[instrument(skip(self))]
    pub async fn acquire_position(&self) -> Result<Coordinates> {
        let coordinates = self.geolocator.current_position().await?;
        if !coordinates.is_finite() {
            warn!("Discarding non-finite position fix");
            return Err(BridgeError::NotAvailable(
                "position fix was not finite".to_string(),
            ));
        }
        info!("Position acquired");
        Ok(coordinates)
    }

    /// Acquires one photo from the camera or gallery.
    #[instrument(skip(self))]
    pub async fn acquire_photo(&self, source: PhotoSource) -> Result<CapturedPhoto> {
        let photo = self.media_picker.capture_photo(source).await?;
        info!(
            file = %strip_path(&photo.uri),
            encoded_len = photo.base64_data.len(),
            "Photo acquired"
        );
        Ok(photo)
    }

    /// Acquires the position and stores it in the draft. The draft is left
    /// untouched on failure.
    pub async fn attach_position(&self, draft: &mut SubmissionDraft) -> Result<()> {
        draft.location = Some(self.acquire_position().await?);
        Ok(())
    }

    /// Acquires a photo and stores it in the draft. The draft is left
    /// untouched on failure, including user cancellation.
    pub async fn attach_photo(
        &self,
        draft: &mut SubmissionDraft,
        source: PhotoSource,
    ) -> Result<()> {
        draft.photo = Some(self.acquire_photo(source).await?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedGeolocator(Coordinates);

    #[async_trait]
    impl Geolocator for FixedGeolocator {
        async fn current_position(&self) -> Result<Coordinates> {
            Ok(self.0)
        }
    }

    struct DeniedGeolocator;

    #[async_trait]
    impl Geolocator for DeniedGeolocator {
        async fn current_position(&self) -> Result<Coordinates> {
            Err(BridgeError::PermissionDenied("location".to_string()))
        }
    }

    struct FixedPicker(CapturedPhoto);

    #[async_trait]
    impl MediaPicker for FixedPicker {
        async fn capture_photo(&self, _source: PhotoSource) -> Result<CapturedPhoto> {
            Ok(self.0.clone())
        }
    }

    struct CancelledPicker;

    #[async_trait]
    impl MediaPicker for CancelledPicker {
        async fn capture_photo(&self, _source: PhotoSource) -> Result<CapturedPhoto> {
            Err(BridgeError::Cancelled)
        }
    }

    fn service(
        geolocator: impl Geolocator + 'static,
        picker: impl MediaPicker + 'static,
    ) -> CaptureService {
        CaptureService::new(Arc::new(geolocator), Arc::new(picker))
    }

    #[tokio::test]
    async fn test_attach_position_fills_draft() {
        let service = service(
            FixedGeolocator(Coordinates::new(19.05, -70.51)),
            CancelledPicker,
        );
        let mut draft = SubmissionDraft::new();

        service.attach_position(&mut draft).await.unwrap();
        assert_eq!(draft.location, Some(Coordinates::new(19.05, -70.51)));
    }

    #[tokio::test]
    async fn test_attach_photo_fills_draft() {
        let photo = CapturedPhoto::new("file:///tmp/DCIM/foto.jpg", "aW1n");
        let service = service(DeniedGeolocator, FixedPicker(photo));
        let mut draft = SubmissionDraft::new();

        service
            .attach_photo(&mut draft, PhotoSource::Camera)
            .await
            .unwrap();
        assert_eq!(draft.photo.as_ref().map(|p| p.base64_data.as_str()), Some("aW1n"));
    }

    #[tokio::test]
    async fn test_non_finite_fix_reported_unavailable() {
        let service = service(
            FixedGeolocator(Coordinates::new(f64::NAN, -70.51)),
            CancelledPicker,
        );

        let err = service.acquire_position().await.unwrap_err();
        assert!(matches!(err, BridgeError::NotAvailable(_)));
    }

    #[tokio::test]
    async fn test_denied_position_leaves_draft_untouched() {
        let service = service(DeniedGeolocator, CancelledPicker);
        let mut draft = SubmissionDraft::new();

        let err = service.attach_position(&mut draft).await.unwrap_err();
        assert!(matches!(err, BridgeError::PermissionDenied(_)));
        assert!(draft.location.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_photo_leaves_draft_untouched() {
        let service = service(DeniedGeolocator, CancelledPicker);
        let mut draft = SubmissionDraft::new();

        let err = service
            .attach_photo(&mut draft, PhotoSource::Gallery)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Cancelled));
        assert!(draft.photo.is_none());
    }
}
