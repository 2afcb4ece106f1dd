//! Map presentation
//!
//! [`MapPresenter`] turns the catalog's derived view, the user position, the
//! highlighted station and the theme into layer/viewport commands on a
//! [`MapSurface`], and feeds taps and long presses back to the caller as
//! [`MapEvent`]s. The four render steps are independent and idempotent: each
//! can replay at any time with the most recent inputs.

pub mod gestures;
pub mod markers;
pub mod surface;
pub mod viewport;

use std::time::Instant;

use tracing::debug;

use crate::catalog::DerivedView;
use crate::models::{GeoPoint, SearchCenter, Station};
use crate::theme::Theme;

pub use gestures::{LongPressRecognizer, LONG_PRESS_DURATION};
pub use markers::{build_marker, format_distance, format_price, style_for, TOP_RANK_COUNT};
pub use surface::{
    HighlightRing, LatLngBounds, MapSurface, MarkerStyle, PriceRow, StationMarker, StationPopup,
};
pub use viewport::{
    fit_for_points, has_valid_coordinates, ViewportFit, FIT_MAX_ZOOM, FIT_PADDING_PX,
    SINGLE_POINT_ZOOM,
};

/// The search-center marker is suppressed when the center sits within this
/// many degrees (~100 m) of the user position on both axes
pub const SEARCH_CENTER_EPSILON_DEG: f64 = 0.001;

/// Diameter of the highlight ring
const HIGHLIGHT_RING_PX: u32 = 48;

/// Interactions the presenter feeds back upstream
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// A station marker was tapped
    StationSelected(Station),
    /// Double-click or long-press requested a new search center
    RelocateSearchCenter(GeoPoint),
}

/// Drives a [`MapSurface`] from the derived station state
pub struct MapPresenter<S: MapSurface> {
    surface: Option<S>,
    theme: Theme,
    long_press: LongPressRecognizer,
    /// Stations as last rendered, for resolving marker taps
    rendered: Vec<Station>,
}

impl<S: MapSurface> MapPresenter<S> {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            surface: None,
            theme,
            long_press: LongPressRecognizer::new(),
            rendered: Vec::new(),
        }
    }

    /// Hand the presenter its surface once the host widget is ready.
    ///
    /// Render steps called before this are silent no-ops.
    pub fn attach_surface(&mut self, mut surface: S) {
        surface.set_basemap(self.theme.tile_set());
        self.surface = Some(surface);
    }

    /// Tear down: cancel pending gestures and release the surface
    pub fn detach_surface(&mut self) -> Option<S> {
        self.long_press.cancel();
        self.rendered.clear();
        self.surface.take()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    /// Rebuild the marker layer and refit the viewport.
    ///
    /// Reacts to derived-view or location changes. Clears and rebuilds all
    /// station markers plus one user marker when the position is known.
    pub fn render_stations(
        &mut self,
        view: &DerivedView,
        user_location: Option<GeoPoint>,
        search_center: Option<SearchCenter>,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Skipping marker render: surface not ready");
            return;
        };

        let station_markers = view
            .stations
            .iter()
            .enumerate()
            .map(|(index, station)| {
                markers::build_marker(station, index + 1, view.fuel, view.average_price)
            })
            .collect();
        surface.replace_markers(station_markers, user_location);
        self.rendered = view.stations.clone();

        let mut points: Vec<GeoPoint> = view
            .stations
            .iter()
            .filter(|station| {
                viewport::has_valid_coordinates(station.latitude, station.longitude)
            })
            .map(Station::position)
            .collect();
        if let Some(user) = user_location {
            points.push(user);
        }
        if let Some(center) = search_center {
            points.push(center.center);
        }

        match viewport::fit_for_points(&points) {
            ViewportFit::Bounds(bounds) => {
                surface.fit_bounds(bounds, FIT_PADDING_PX, FIT_MAX_ZOOM);
            }
            ViewportFit::Center(point) => surface.set_view(point, SINGLE_POINT_ZOOM),
            ViewportFit::Unchanged => {}
        }
    }

    /// Show, move or remove the highlight ring.
    ///
    /// Pans (never zooms) when the highlighted station lies outside the
    /// visible viewport.
    pub fn render_highlight(&mut self, station: Option<&Station>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match station {
            Some(station) => {
                let position = station.position();
                surface.set_highlight(Some(HighlightRing {
                    position,
                    diameter_px: HIGHLIGHT_RING_PX,
                }));
                if !surface.visible_bounds().contains(position) {
                    surface.pan_to(position);
                }
            }
            None => surface.set_highlight(None),
        }
    }

    /// Show the search-center marker, unless it would stack on the user's
    /// own position
    pub fn render_search_center(
        &mut self,
        search_center: Option<SearchCenter>,
        user_location: Option<GeoPoint>,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let shown = search_center
            .map(|sc| sc.center)
            .filter(|center| match user_location {
                Some(user) => !center.roughly_equals(&user, SEARCH_CENTER_EPSILON_DEG),
                None => true,
            });
        surface.set_search_center_marker(shown);
    }

    /// Swap the basemap for the theme, leaving markers and viewport alone
    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_basemap(theme.tile_set());
        }
    }

    /// Resolve a marker tap into a selection event
    #[must_use]
    pub fn marker_clicked(&self, station_id: &str) -> Option<MapEvent> {
        self.rendered
            .iter()
            .find(|station| station.id == station_id)
            .cloned()
            .map(MapEvent::StationSelected)
    }

    /// A double-click on the map surface relocates the search center
    #[must_use]
    pub fn double_click(&mut self, point: GeoPoint) -> MapEvent {
        MapEvent::RelocateSearchCenter(point)
    }

    pub fn pointer_down(&mut self, point: GeoPoint, contact_count: u8, now: Instant) {
        self.long_press.pointer_down(point, contact_count, now);
    }

    pub fn pointer_move(&mut self) {
        self.long_press.pointer_move();
    }

    pub fn pointer_up(&mut self) {
        self.long_press.pointer_up();
    }

    pub fn pointer_cancel(&mut self) {
        self.long_press.pointer_cancel();
    }

    /// Drive the long-press timer; emits at most one relocation per press
    pub fn poll_long_press(&mut self, now: Instant) -> Option<MapEvent> {
        self.long_press
            .poll(now)
            .map(MapEvent::RelocateSearchCenter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FuelKind, FuelPrices};
    use crate::theme::TileSet;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeSurface {
        basemaps: Vec<TileSet>,
        markers: Vec<StationMarker>,
        user_marker: Option<GeoPoint>,
        marker_rebuilds: usize,
        search_center_marker: Option<GeoPoint>,
        highlight: Option<HighlightRing>,
        fits: Vec<(LatLngBounds, u32, u8)>,
        views: Vec<(GeoPoint, u8)>,
        pans: Vec<GeoPoint>,
        visible: Option<LatLngBounds>,
    }

    impl MapSurface for FakeSurface {
        fn set_basemap(&mut self, tiles: TileSet) {
            self.basemaps.push(tiles);
        }

        fn replace_markers(
            &mut self,
            stations: Vec<StationMarker>,
            user_location: Option<GeoPoint>,
        ) {
            self.markers = stations;
            self.user_marker = user_location;
            self.marker_rebuilds += 1;
        }

        fn set_search_center_marker(&mut self, position: Option<GeoPoint>) {
            self.search_center_marker = position;
        }

        fn set_highlight(&mut self, ring: Option<HighlightRing>) {
            self.highlight = ring;
        }

        fn fit_bounds(&mut self, bounds: LatLngBounds, padding_px: u32, max_zoom: u8) {
            self.fits.push((bounds, padding_px, max_zoom));
        }

        fn set_view(&mut self, center: GeoPoint, zoom: u8) {
            self.views.push((center, zoom));
        }

        fn pan_to(&mut self, point: GeoPoint) {
            self.pans.push(point);
        }

        fn visible_bounds(&self) -> LatLngBounds {
            self.visible.unwrap_or(LatLngBounds {
                south: 39.0,
                west: -5.0,
                north: 41.0,
                east: -2.0,
            })
        }
    }

    fn station(id: &str, latitude: f64, diesel: Option<f64>) -> Station {
        Station {
            id: id.to_string(),
            name: format!("Station {id}"),
            address: String::new(),
            latitude,
            longitude: -3.7,
            region: None,
            locality: None,
            brand: None,
            opening_hours: None,
            distance_km: None,
            prices: FuelPrices {
                diesel,
                ..FuelPrices::default()
            },
        }
    }

    fn diesel_view(stations: Vec<Station>, average_price: f64) -> DerivedView {
        DerivedView {
            stations,
            average_price,
            fuel: FuelKind::Diesel,
        }
    }

    fn ready_presenter() -> MapPresenter<FakeSurface> {
        let mut presenter = MapPresenter::new(Theme::Dark);
        presenter.attach_surface(FakeSurface::default());
        presenter
    }

    #[test]
    fn test_render_before_attach_is_noop() {
        let mut presenter: MapPresenter<FakeSurface> = MapPresenter::new(Theme::Dark);
        let view = diesel_view(vec![station("1", 40.1, Some(1.30))], 1.30);
        presenter.render_stations(&view, None, None);
        presenter.render_highlight(None);
        presenter.render_search_center(None, None);
        assert!(!presenter.is_ready());
    }

    #[test]
    fn test_marker_rebuild_encodes_rank_and_cheapness() {
        let mut presenter = ready_presenter();
        // Sorted order: 1.30, 1.45, 1.60, missing; average 1.45
        let view = diesel_view(
            vec![
                station("a", 40.10, Some(1.30)),
                station("b", 40.20, Some(1.45)),
                station("c", 40.30, Some(1.60)),
                station("d", 40.40, None),
            ],
            1.45,
        );
        let user = GeoPoint::new(40.0, -3.7);

        presenter.render_stations(&view, Some(user), None);

        let surface = presenter.surface.as_ref().unwrap();
        assert_eq!(surface.markers.len(), 4);
        assert_eq!(surface.user_marker, Some(user));
        assert_eq!(surface.markers[0].style, MarkerStyle::Top { rank: 1 });
        assert_eq!(surface.markers[1].style, MarkerStyle::Top { rank: 2 });
        assert_eq!(surface.markers[2].style, MarkerStyle::Top { rank: 3 });
        assert_eq!(surface.markers[3].style, MarkerStyle::Neutral);
    }

    #[test]
    fn test_viewport_fits_bounding_box_for_many_points() {
        let mut presenter = ready_presenter();
        let view = diesel_view(
            vec![
                station("a", 40.10, Some(1.30)),
                station("b", 40.50, Some(1.45)),
            ],
            1.375,
        );

        presenter.render_stations(&view, None, None);

        let surface = presenter.surface.as_ref().unwrap();
        let (bounds, padding, max_zoom) = surface.fits[0];
        assert_eq!(padding, FIT_PADDING_PX);
        assert_eq!(max_zoom, FIT_MAX_ZOOM);
        assert!(bounds.contains(GeoPoint::new(40.10, -3.7)));
        assert!(bounds.contains(GeoPoint::new(40.50, -3.7)));
        assert!(surface.views.is_empty());
    }

    #[test]
    fn test_viewport_centers_on_single_point() {
        let mut presenter = ready_presenter();
        let view = diesel_view(vec![station("a", 40.10, Some(1.30))], 1.30);

        presenter.render_stations(&view, None, None);

        let surface = presenter.surface.as_ref().unwrap();
        assert_eq!(
            surface.views,
            vec![(GeoPoint::new(40.10, -3.7), SINGLE_POINT_ZOOM)]
        );
        assert!(surface.fits.is_empty());
    }

    #[test]
    fn test_viewport_unchanged_without_points() {
        let mut presenter = ready_presenter();
        let view = diesel_view(vec![], 0.0);

        presenter.render_stations(&view, None, None);

        let surface = presenter.surface.as_ref().unwrap();
        assert!(surface.fits.is_empty());
        assert!(surface.views.is_empty());
    }

    #[test]
    fn test_search_center_marker_suppressed_near_user() {
        let mut presenter = ready_presenter();
        let user = GeoPoint::new(40.0, -3.0);

        presenter.render_search_center(
            Some(SearchCenter::new(GeoPoint::new(40.0, -3.0), 20.0)),
            Some(user),
        );
        assert_eq!(
            presenter.surface.as_ref().unwrap().search_center_marker,
            None
        );

        presenter.render_search_center(
            Some(SearchCenter::new(GeoPoint::new(40.1, -3.0), 20.0)),
            Some(user),
        );
        assert_eq!(
            presenter.surface.as_ref().unwrap().search_center_marker,
            Some(GeoPoint::new(40.1, -3.0))
        );
    }

    #[test]
    fn test_highlight_pans_only_when_off_screen() {
        let mut presenter = ready_presenter();
        presenter.surface.as_mut().unwrap().visible = Some(LatLngBounds {
            south: 39.0,
            west: -5.0,
            north: 41.0,
            east: -2.0,
        });

        let inside = station("in", 40.0, Some(1.30));
        presenter.render_highlight(Some(&inside));
        {
            let surface = presenter.surface.as_ref().unwrap();
            assert!(surface.highlight.is_some());
            assert!(surface.pans.is_empty());
        }

        let outside = station("out", 43.5, Some(1.30));
        presenter.render_highlight(Some(&outside));
        {
            let surface = presenter.surface.as_ref().unwrap();
            assert_eq!(surface.pans, vec![outside.position()]);
        }

        presenter.render_highlight(None);
        assert!(presenter.surface.as_ref().unwrap().highlight.is_none());
    }

    #[test]
    fn test_theme_swap_does_not_touch_markers() {
        let mut presenter = ready_presenter();
        let view = diesel_view(vec![station("a", 40.10, Some(1.30))], 1.30);
        presenter.render_stations(&view, None, None);

        let rebuilds_before = presenter.surface.as_ref().unwrap().marker_rebuilds;
        presenter.apply_theme(Theme::Light);

        let surface = presenter.surface.as_ref().unwrap();
        assert_eq!(surface.marker_rebuilds, rebuilds_before);
        // Initial dark basemap at attach, then the light swap
        assert_eq!(surface.basemaps.len(), 2);
        assert!(surface.basemaps[1].url_template.contains("light_all"));
    }

    #[test]
    fn test_marker_click_emits_selection() {
        let mut presenter = ready_presenter();
        let view = diesel_view(vec![station("a", 40.10, Some(1.30))], 1.30);
        presenter.render_stations(&view, None, None);

        match presenter.marker_clicked("a") {
            Some(MapEvent::StationSelected(station)) => assert_eq!(station.id, "a"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(presenter.marker_clicked("zz").is_none());
    }

    #[test]
    fn test_long_press_relocates_once() {
        let mut presenter = ready_presenter();
        let start = Instant::now();
        let point = GeoPoint::new(40.2, -3.5);

        presenter.pointer_down(point, 1, start);
        assert_eq!(presenter.poll_long_press(start), None);
        assert_eq!(
            presenter.poll_long_press(start + LONG_PRESS_DURATION),
            Some(MapEvent::RelocateSearchCenter(point))
        );
        assert_eq!(
            presenter.poll_long_press(start + Duration::from_secs(2)),
            None
        );
    }

    #[test]
    fn test_detach_cancels_pending_press() {
        let mut presenter = ready_presenter();
        let start = Instant::now();

        presenter.pointer_down(GeoPoint::new(40.2, -3.5), 1, start);
        let surface = presenter.detach_surface();
        assert!(surface.is_some());
        assert!(!presenter.is_ready());
        assert_eq!(
            presenter.poll_long_press(start + Duration::from_secs(2)),
            None
        );
    }
}
