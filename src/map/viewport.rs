//! Viewport fitting decisions
//!
//! Pure bounds math: given the points worth showing, decide whether to fit a
//! bounding box, center on a lone point, or leave the viewport alone.

use crate::map::surface::LatLngBounds;
use crate::models::GeoPoint;

/// Pixel padding applied around a fitted bounding box
pub const FIT_PADDING_PX: u32 = 40;
/// Zoom ceiling when fitting, so sparse or clustered results don't over-zoom
pub const FIT_MAX_ZOOM: u8 = 14;
/// Zoom used when centering on a single point
pub const SINGLE_POINT_ZOOM: u8 = 13;

/// What to do with the viewport after a data change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportFit {
    /// Fit the bounding box of two or more points
    Bounds(LatLngBounds),
    /// Center on the only available point
    Center(GeoPoint),
    /// Nothing to show; keep the prior viewport
    Unchanged,
}

/// Decide the viewport fit for the given points
#[must_use]
pub fn fit_for_points(points: &[GeoPoint]) -> ViewportFit {
    match points {
        [] => ViewportFit::Unchanged,
        [only] => ViewportFit::Center(*only),
        [first, rest @ ..] => {
            let mut bounds = LatLngBounds::from_point(*first);
            for point in rest {
                bounds.extend(*point);
            }
            ViewportFit::Bounds(bounds)
        }
    }
}

/// Whether a coordinate pair is worth fitting the viewport to
#[must_use]
pub fn has_valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite() && longitude.is_finite() && latitude != 0.0 && longitude != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_points_leaves_viewport() {
        assert_eq!(fit_for_points(&[]), ViewportFit::Unchanged);
    }

    #[test]
    fn test_single_point_centers() {
        let point = GeoPoint::new(40.4168, -3.7038);
        assert_eq!(fit_for_points(&[point]), ViewportFit::Center(point));
    }

    #[test]
    fn test_multiple_points_fit_bounding_box() {
        let points = [
            GeoPoint::new(40.0, -3.0),
            GeoPoint::new(41.0, -2.0),
            GeoPoint::new(40.5, -4.0),
        ];
        let ViewportFit::Bounds(bounds) = fit_for_points(&points) else {
            panic!("expected a bounds fit");
        };
        for point in points {
            assert!(bounds.contains(point));
        }
        assert_eq!(bounds.south, 40.0);
        assert_eq!(bounds.north, 41.0);
        assert_eq!(bounds.west, -4.0);
        assert_eq!(bounds.east, -2.0);
    }

    #[test]
    fn test_valid_coordinates() {
        assert!(has_valid_coordinates(40.0, -3.0));
        assert!(!has_valid_coordinates(0.0, -3.0));
        assert!(!has_valid_coordinates(40.0, 0.0));
        assert!(!has_valid_coordinates(f64::NAN, -3.0));
    }
}
