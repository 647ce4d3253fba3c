//! Geolocation Abstraction
//!
//! Contract for acquiring the device's current position before a damage
//! report is submitted. The core never implements positioning itself; mobile
//! hosts provide it from their location services and desktop builds use the
//! fixed-position shim from `bridge-desktop`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A pair of finite WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite numbers.
    ///
    /// Non-finite pairs must never reach a map-plottable collection.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Device positioning capability.
///
/// # Errors
///
/// - `BridgeError::PermissionDenied` when the user refused the location
///   permission prompt.
/// - `BridgeError::NotAvailable` when no position can be produced (location
///   services disabled, no fix, unsupported platform).
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Acquire the current device position.
    async fn current_position(&self) -> Result<Coordinates>;
}
