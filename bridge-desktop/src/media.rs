//! File-Backed Media Picker Shim
//!
//! Desktop builds have no camera or photo library; this implementation reads
//! a configured image file and base64-encodes it, which is enough to exercise
//! the whole report-submission path in development and tests.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bridge_traits::{
    error::{BridgeError, Result},
    media::{CapturedPhoto, MediaPicker, PhotoSource},
};
use std::path::PathBuf;
use tracing::debug;

/// Media picker that serves one image file from disk.
pub struct FileMediaPicker {
    photo_path: Option<PathBuf>,
}

impl FileMediaPicker {
    /// Create a picker with no image; `capture_photo` fails with `Cancelled`
    /// until a path is configured, mirroring a user dismissing the picker.
    pub fn new() -> Self {
        Self { photo_path: None }
    }

    /// Create a picker that serves the image at the given path.
    pub fn with_photo(path: impl Into<PathBuf>) -> Self {
        Self {
            photo_path: Some(path.into()),
        }
    }
}

impl Default for FileMediaPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaPicker for FileMediaPicker {
    async fn capture_photo(&self, source: PhotoSource) -> Result<CapturedPhoto> {
        let path = match &self.photo_path {
            Some(path) => path,
            None => return Err(BridgeError::Cancelled),
        };

        let data = tokio::fs::read(path).await?;
        let encoded = STANDARD.encode(&data);

        debug!(
            source = ?source,
            path = %path.display(),
            bytes = data.len(),
            "Serving photo from disk"
        );

        Ok(CapturedPhoto::new(
            format!("file://{}", path.display()),
            encoded,
        ))
    }
}
