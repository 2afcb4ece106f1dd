//! Abstraction over the interactive map widget
//!
//! The presenter never draws pixels; it issues layer and viewport commands
//! through [`MapSurface`] and the host widget (Leaflet-style) executes them.

use crate::models::GeoPoint;
use crate::theme::TileSet;

/// Geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    /// Degenerate box around a single point
    #[must_use]
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            south: point.latitude,
            west: point.longitude,
            north: point.latitude,
            east: point.longitude,
        }
    }

    /// Grow the box to include `point`
    pub fn extend(&mut self, point: GeoPoint) {
        self.south = self.south.min(point.latitude);
        self.north = self.north.max(point.latitude);
        self.west = self.west.min(point.longitude);
        self.east = self.east.max(point.longitude);
    }

    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude >= self.south
            && point.latitude <= self.north
            && point.longitude >= self.west
            && point.longitude <= self.east
    }

    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// Visual class of a station marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// One of the three cheapest stations: larger icon, accent border and a
    /// rank badge
    Top { rank: u8 },
    /// Priced below the current average: accent border
    Cheap,
    Neutral,
}

/// One row of the popup's compact all-prices table
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub label: &'static str,
    pub text: String,
}

/// Content model for a station popup
#[derive(Debug, Clone, PartialEq)]
pub struct StationPopup {
    /// Rank shown as a badge for top stations
    pub rank_badge: Option<u8>,
    pub title: String,
    /// "Locality · Region" line, empty when neither is known
    pub locality_line: String,
    pub brand: Option<String>,
    /// Label of the fuel the view is ranked by
    pub fuel_label: &'static str,
    /// Formatted selected-fuel price, or the no-data text
    pub price_text: String,
    pub distance_text: Option<String>,
    pub opening_hours: Option<String>,
    /// Other fuels this station sells
    pub other_prices: Vec<PriceRow>,
}

/// An interactive station marker
#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker {
    pub station_id: String,
    pub position: GeoPoint,
    pub style: MarkerStyle,
    pub popup: StationPopup,
}

/// Non-interactive pulsing ring shown over a highlighted station
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRing {
    pub position: GeoPoint,
    pub diameter_px: u32,
}

/// Commands the presenter issues to the host map widget.
///
/// Every method is safe to call repeatedly with the same arguments; the
/// widget replaces layers rather than accumulating them.
pub trait MapSurface {
    /// Swap the basemap tile layer, leaving markers and viewport untouched
    fn set_basemap(&mut self, tiles: TileSet);

    /// Clear and rebuild the marker layer: station markers plus, when known,
    /// one user-location marker
    fn replace_markers(&mut self, stations: Vec<StationMarker>, user_location: Option<GeoPoint>);

    /// Show or remove the dashed search-center marker
    fn set_search_center_marker(&mut self, position: Option<GeoPoint>);

    /// Show or remove the highlight ring
    fn set_highlight(&mut self, ring: Option<HighlightRing>);

    /// Fit the viewport to a bounding box with pixel padding, never zooming
    /// past `max_zoom`
    fn fit_bounds(&mut self, bounds: LatLngBounds, padding_px: u32, max_zoom: u8);

    /// Center the viewport at a fixed zoom level
    fn set_view(&mut self, center: GeoPoint, zoom: u8);

    /// Pan (without changing zoom) until `point` is visible
    fn pan_to(&mut self, point: GeoPoint);

    /// Currently visible bounding box
    fn visible_bounds(&self) -> LatLngBounds;
}
