//! Geographic point and search-center models

use serde::{Deserialize, Serialize};

/// A WGS84 point in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a "lat, lon" coordinate string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Whether two points coincide within `epsilon` degrees on both axes
    #[must_use]
    pub fn roughly_equals(&self, other: &GeoPoint, epsilon: f64) -> bool {
        (self.latitude - other.latitude).abs() <= epsilon
            && (self.longitude - other.longitude).abs() <= epsilon
    }
}

/// The point and radius currently driving the loaded station set.
///
/// Distinct from the sensed user location: it starts there, but persists
/// independently once the user relocates the search by hand.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SearchCenter {
    pub center: GeoPoint,
    /// Search radius in kilometers
    pub radius_km: f64,
}

impl SearchCenter {
    #[must_use]
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates() {
        let p = GeoPoint::new(40.4168, -3.7038);
        assert_eq!(p.format_coordinates(), "40.4168, -3.7038");
    }

    #[test]
    fn test_roughly_equals() {
        let a = GeoPoint::new(40.0, -3.0);
        let b = GeoPoint::new(40.0005, -3.0005);
        assert!(a.roughly_equals(&b, 0.001));

        let c = GeoPoint::new(40.1, -3.0);
        assert!(!a.roughly_equals(&c, 0.001));
    }
}
