//! Fixed-Position Geolocation Shim
//!
//! Desktop machines have no GPS, so this implementation serves a configured
//! position for development and tests, and reports the capability as
//! unavailable otherwise.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    geolocation::{Coordinates, Geolocator},
};
use tracing::debug;

/// Geolocator that always returns one configured position.
pub struct StaticGeolocator {
    position: Option<Coordinates>,
}

impl StaticGeolocator {
    /// Create a geolocator with no position; `current_position` fails with
    /// `NotAvailable` until one is configured.
    pub fn new() -> Self {
        Self { position: None }
    }

    /// Create a geolocator pinned to the given position.
    pub fn with_position(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Some(Coordinates::new(latitude, longitude)),
        }
    }
}

impl Default for StaticGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geolocator for StaticGeolocator {
    async fn current_position(&self) -> Result<Coordinates> {
        match self.position {
            Some(coords) => {
                debug!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    "Serving fixed position"
                );
                Ok(coords)
            }
            None => Err(BridgeError::NotAvailable(
                "No position configured; desktop builds have no location source".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_position_is_served() {
        let geo = StaticGeolocator::with_position(18.4861, -69.9312);
        let coords = geo.current_position().await.unwrap();

        assert_eq!(coords.latitude, 18.4861);
        assert_eq!(coords.longitude, -69.9312);
    }

    #[tokio::test]
    async fn test_unconfigured_position_is_unavailable() {
        let geo = StaticGeolocator::new();
        let result = geo.current_position().await;

        assert!(matches!(result, Err(BridgeError::NotAvailable(_))));
    }
}
