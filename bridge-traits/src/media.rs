//! Media Capture Abstraction
//!
//! Contract for acquiring a photo with its encoded bytes before a damage
//! report is submitted. Mobile hosts back this with the camera and photo
//! library; desktop builds use the file-backed shim from `bridge-desktop`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Where the photo should come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource {
    Camera,
    Gallery,
}

/// A captured photo: a host-local reference plus its base64-encoded bytes.
///
/// The encoded bytes travel in the report submission payload; the URI is only
/// a display handle for the host and never leaves the device.
#[derive(Clone, Serialize, Deserialize)]
pub struct CapturedPhoto {
    /// Host-local reference (file path or content URI)
    pub uri: String,
    /// Image bytes, base64-encoded
    pub base64_data: String,
}

impl CapturedPhoto {
    pub fn new(uri: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            base64_data: base64_data.into(),
        }
    }
}

// Encoded image bytes are bulky and useless in logs; show their size only.
impl fmt::Debug for CapturedPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedPhoto")
            .field("uri", &self.uri)
            .field("base64_data", &format!("<{} bytes>", self.base64_data.len()))
            .finish()
    }
}

/// Photo acquisition capability.
///
/// # Errors
///
/// - `BridgeError::PermissionDenied` when the camera or library permission
///   was refused.
/// - `BridgeError::Cancelled` when the user dismissed the picker.
/// - `BridgeError::NotAvailable` when the platform has no such capability.
#[async_trait]
pub trait MediaPicker: Send + Sync {
    /// Acquire one photo from the given source.
    async fn capture_photo(&self, source: PhotoSource) -> Result<CapturedPhoto>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_image_bytes() {
        let photo = CapturedPhoto::new("file:///tmp/foto.jpg", "aGVsbG8gd29ybGQ=");
        let debug = format!("{:?}", photo);
        assert!(debug.contains("file:///tmp/foto.jpg"));
        assert!(!debug.contains("aGVsbG8gd29ybGQ="));
    }
}
