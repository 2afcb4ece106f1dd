//! Device position resolution and great-circle distances
//!
//! [`GeoLocator`] wraps whatever position-sensing capability the host offers
//! behind the [`LocationSensor`] seam, keeps the process-wide last known
//! location, and computes haversine distances for station annotation and
//! view fitting.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::LocationError;
use crate::models::GeoPoint;

/// One position fix is requested with these parameters
const SENSOR_TIMEOUT: Duration = Duration::from_secs(10);
/// The sensor may reuse a cached fix up to this old
const SENSOR_MAX_CACHE_AGE: Duration = Duration::from_secs(300);

/// Parameters for a single position request
#[derive(Debug, Clone, Copy)]
pub struct PositionRequest {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub max_cache_age: Duration,
}

/// Raw failure reported by the sensing capability.
///
/// `code` follows the conventional geolocation numbering (1 permission
/// denied, 2 position unavailable, 3 timeout); anything else is unspecified.
#[derive(Debug, Clone)]
pub struct SensorFailure {
    pub code: Option<u8>,
    pub message: String,
}

/// Host capability that produces the current device position
#[async_trait]
pub trait LocationSensor: Send + Sync {
    async fn current_position(
        &self,
        request: PositionRequest,
    ) -> Result<GeoPoint, SensorFailure>;
}

/// Sensor that always reports the same position.
///
/// Stands in for a real device sensor in the demo binary and in tests.
pub struct FixedLocationSensor {
    position: GeoPoint,
}

impl FixedLocationSensor {
    #[must_use]
    pub fn new(position: GeoPoint) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationSensor for FixedLocationSensor {
    async fn current_position(
        &self,
        _request: PositionRequest,
    ) -> Result<GeoPoint, SensorFailure> {
        Ok(self.position)
    }
}

/// Resolves and remembers the user position
pub struct GeoLocator {
    sensor: Option<Box<dyn LocationSensor>>,
    last_known: Option<GeoPoint>,
    last_error: Option<LocationError>,
    is_locating: bool,
}

impl GeoLocator {
    /// Create a locator over the host sensor, or without one when the
    /// capability is absent
    #[must_use]
    pub fn new(sensor: Option<Box<dyn LocationSensor>>) -> Self {
        Self {
            sensor,
            last_known: None,
            last_error: None,
            is_locating: false,
        }
    }

    /// Perform one best-effort position fetch.
    ///
    /// Always invokes the sensor (the sensor itself may serve a fix cached up
    /// to five minutes). On success the point becomes the process-wide last
    /// known location. Failures are returned and retained as readable state;
    /// no automatic retry happens here.
    pub async fn resolve_location(&mut self) -> Result<GeoPoint, LocationError> {
        let Some(sensor) = self.sensor.as_ref() else {
            let err = LocationError::Unsupported;
            self.last_error = Some(err.clone());
            return Err(err);
        };

        self.is_locating = true;
        self.last_error = None;

        let request = PositionRequest {
            high_accuracy: true,
            timeout: SENSOR_TIMEOUT,
            max_cache_age: SENSOR_MAX_CACHE_AGE,
        };

        let outcome = sensor.current_position(request).await;
        self.is_locating = false;

        match outcome {
            Ok(position) => {
                debug!("Resolved position: {}", position.format_coordinates());
                self.last_known = Some(position);
                Ok(position)
            }
            Err(failure) => {
                let err = LocationError::from_sensor_code(failure.code);
                warn!(
                    "Position fetch failed (code {:?}): {}",
                    failure.code, failure.message
                );
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Great-circle distance between two points in kilometers, 2 decimals
    #[must_use]
    pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
        let from = haversine::Location {
            latitude: a.latitude,
            longitude: a.longitude,
        };
        let to = haversine::Location {
            latitude: b.latitude,
            longitude: b.longitude,
        };
        let km = haversine::distance(from, to, haversine::Units::Kilometers);
        (km * 100.0).round() / 100.0
    }

    /// Distance from the last known location, `None` until one has resolved
    #[must_use]
    pub fn distance_from_last_known(&self, point: GeoPoint) -> Option<f64> {
        self.last_known
            .map(|last| Self::distance_km(last, point))
    }

    #[must_use]
    pub fn last_known_location(&self) -> Option<GeoPoint> {
        self.last_known
    }

    #[must_use]
    pub fn has_location(&self) -> bool {
        self.last_known.is_some()
    }

    #[must_use]
    pub fn is_locating(&self) -> bool {
        self.is_locating
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&LocationError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct FailingSensor {
        code: Option<u8>,
    }

    #[async_trait]
    impl LocationSensor for FailingSensor {
        async fn current_position(
            &self,
            _request: PositionRequest,
        ) -> Result<GeoPoint, SensorFailure> {
            Err(SensorFailure {
                code: self.code,
                message: "sensor failure".to_string(),
            })
        }
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let madrid = GeoPoint::new(40.4168, -3.7038);
        assert_eq!(GeoLocator::distance_km(madrid, madrid), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let madrid = GeoPoint::new(40.4168, -3.7038);
        let barcelona = GeoPoint::new(41.3874, 2.1686);
        assert_eq!(
            GeoLocator::distance_km(madrid, barcelona),
            GeoLocator::distance_km(barcelona, madrid)
        );
    }

    #[test]
    fn test_distance_madrid_barcelona() {
        let madrid = GeoPoint::new(40.4168, -3.7038);
        let barcelona = GeoPoint::new(41.3874, 2.1686);
        let km = GeoLocator::distance_km(madrid, barcelona);
        // Great-circle distance is just above 500 km
        assert!((km - 505.0).abs() < 5.0, "unexpected distance {km}");
    }

    #[test]
    fn test_distance_from_last_known_without_fix() {
        let locator = GeoLocator::new(None);
        assert_eq!(
            locator.distance_from_last_known(GeoPoint::new(40.0, -3.0)),
            None
        );
    }

    #[tokio::test]
    async fn test_resolve_without_sensor_is_unsupported() {
        let mut locator = GeoLocator::new(None);
        let err = locator.resolve_location().await.unwrap_err();
        assert_eq!(err, LocationError::Unsupported);
        assert_eq!(locator.last_error(), Some(&LocationError::Unsupported));
        assert!(!locator.has_location());
    }

    #[tokio::test]
    async fn test_resolve_records_last_known() {
        let position = GeoPoint::new(40.4168, -3.7038);
        let mut locator =
            GeoLocator::new(Some(Box::new(FixedLocationSensor::new(position))));

        let resolved = locator.resolve_location().await.unwrap();
        assert_eq!(resolved, position);
        assert_eq!(locator.last_known_location(), Some(position));
        assert!(!locator.is_locating());

        let near = GeoPoint::new(40.4268, -3.7038);
        let distance = locator.distance_from_last_known(near).unwrap();
        assert!(distance > 0.0 && distance < 2.0);
    }

    #[rstest]
    #[case(Some(1), LocationError::PermissionDenied)]
    #[case(Some(2), LocationError::PositionUnavailable)]
    #[case(Some(3), LocationError::Timeout)]
    #[case(Some(99), LocationError::Unknown)]
    #[case(None, LocationError::Unknown)]
    #[tokio::test]
    async fn test_resolve_maps_sensor_codes(
        #[case] code: Option<u8>,
        #[case] expected: LocationError,
    ) {
        let mut locator = GeoLocator::new(Some(Box::new(FailingSensor { code })));
        let err = locator.resolve_location().await.unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(locator.last_error(), Some(&expected));
    }
}
