//! Station catalog: canonical station list, selection state and the derived
//! price-ranked views
//!
//! The catalog owns all shared state. Everything downstream (stats, map
//! markers) reads the derived views; nothing mutates stations from outside.
//! The derived views are pure functions of {stations, query, selected fuel}
//! and are recomputed from current state on every read.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::SurtigoConfig;
use crate::models::{round3, FuelKind, GeoPoint, SearchCenter, Station};
use crate::providers::{Geocoder, RawStationRecord, StationProvider};

/// Snapshot of the derived station projection for one render pass
#[derive(Debug, Clone)]
pub struct DerivedView {
    /// Stations matching the active query, ascending by selected-fuel price,
    /// stations without that price last
    pub stations: Vec<Station>,
    /// Mean of the present prices for the selected fuel, 3 decimals, 0 when
    /// no station sells it
    pub average_price: f64,
    /// The fuel kind the view is ranked by
    pub fuel: FuelKind,
}

impl DerivedView {
    /// Lowest present price in the view
    #[must_use]
    pub fn cheapest_price(&self) -> Option<f64> {
        self.stations
            .first()
            .and_then(|station| station.price_of(self.fuel))
    }
}

/// Owns the canonical station list and orchestrates (re)loading
pub struct StationCatalog {
    provider: Box<dyn StationProvider>,
    geocoder: Box<dyn Geocoder>,
    station_limit: u32,

    stations: Vec<Station>,
    is_loading: bool,
    error: Option<String>,
    selected_fuel: FuelKind,
    query: String,
    search_center: Option<SearchCenter>,
    last_radius_km: f64,
    last_loaded_at: Option<DateTime<Utc>>,
}

impl StationCatalog {
    /// Create a catalog over the given collaborators
    #[must_use]
    pub fn new(
        provider: Box<dyn StationProvider>,
        geocoder: Box<dyn Geocoder>,
        config: &SurtigoConfig,
    ) -> Self {
        Self {
            provider,
            geocoder,
            station_limit: config.defaults.station_limit,
            stations: Vec::new(),
            is_loading: false,
            error: None,
            selected_fuel: FuelKind::Regular95,
            query: String::new(),
            search_center: None,
            last_radius_km: config.defaults.radius_km,
            last_loaded_at: None,
        }
    }

    /// Load the stations around a point, replacing the list wholesale.
    ///
    /// On failure the list is emptied and a user-facing error message is
    /// kept; the caller decides when to retry. Concurrent loads are not
    /// cancelled: the last one to resolve wins.
    pub async fn load_around(&mut self, center: GeoPoint, radius_km: f64) {
        self.is_loading = true;
        self.error = None;
        self.search_center = Some(SearchCenter::new(center, radius_km));
        self.last_radius_km = radius_km;

        let result = self
            .provider
            .fetch_radius(
                center.latitude,
                center.longitude,
                radius_km,
                self.station_limit,
            )
            .await;

        match result {
            Ok(records) => {
                self.stations = records
                    .into_iter()
                    .map(RawStationRecord::into_station)
                    .collect();
                self.last_loaded_at = Some(Utc::now());
                info!(
                    "Loaded {} stations around {}",
                    self.stations.len(),
                    center.format_coordinates()
                );
            }
            Err(e) => {
                warn!("Station load failed: {e}");
                self.error = Some(e.user_message());
                self.stations.clear();
            }
        }

        self.is_loading = false;
    }

    /// Resolve free text to a place and reload around it with the last-used
    /// radius.
    ///
    /// A geocoding miss (or failure) is a silent no-op: current stations stay
    /// on screen and no error is surfaced.
    pub async fn search_by_place_name(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        match self.geocoder.geocode(trimmed).await {
            Ok(Some(point)) => {
                debug!(
                    "Geocoded '{trimmed}' to {}",
                    point.format_coordinates()
                );
                self.query.clear();
                self.load_around(point, self.last_radius_km).await;
            }
            Ok(None) => {
                debug!("No geocoding match for '{trimmed}'");
            }
            Err(e) => {
                debug!("Geocoding failed for '{trimmed}': {e}");
            }
        }
    }

    pub fn set_selected_fuel(&mut self, kind: FuelKind) {
        self.selected_fuel = kind;
    }

    pub fn set_query<S: Into<String>>(&mut self, text: S) {
        self.query = text.into();
    }

    /// Stations matching the active free-text query.
    ///
    /// A station matches when the trimmed, case-insensitive query is a
    /// substring of its name, address, locality or region.
    #[must_use]
    pub fn filtered_stations(&self) -> Vec<&Station> {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return self.stations.iter().collect();
        }

        self.stations
            .iter()
            .filter(|station| station.matches_query(&query))
            .collect()
    }

    /// Filtered stations ordered ascending by the selected fuel's price.
    ///
    /// Stations without that price sort after every priced one; ties keep
    /// their previous relative order.
    #[must_use]
    pub fn sorted_stations(&self) -> Vec<&Station> {
        let mut stations = self.filtered_stations();
        stations.sort_by(|a, b| {
            let price_a = a.price_of(self.selected_fuel).unwrap_or(f64::INFINITY);
            let price_b = b.price_of(self.selected_fuel).unwrap_or(f64::INFINITY);
            price_a.total_cmp(&price_b)
        });
        stations
    }

    /// Mean of the present, strictly-positive prices for the selected fuel
    /// across the current view, rounded to 3 decimals; 0 when none
    #[must_use]
    pub fn average_price(&self) -> f64 {
        let prices: Vec<f64> = self
            .sorted_stations()
            .iter()
            .filter_map(|station| station.price_of(self.selected_fuel))
            .filter(|price| *price > 0.0)
            .collect();

        if prices.is_empty() {
            return 0.0;
        }
        round3(prices.iter().sum::<f64>() / prices.len() as f64)
    }

    /// Lowest present price for the selected fuel in the current view
    #[must_use]
    pub fn cheapest_price(&self) -> Option<f64> {
        self.sorted_stations()
            .first()
            .and_then(|station| station.price_of(self.selected_fuel))
    }

    /// Snapshot of the derived projection for the presenter
    #[must_use]
    pub fn view(&self) -> DerivedView {
        DerivedView {
            stations: self.sorted_stations().into_iter().cloned().collect(),
            average_price: self.average_price(),
            fuel: self.selected_fuel,
        }
    }

    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn selected_fuel(&self) -> FuelKind {
        self.selected_fuel
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn search_center(&self) -> Option<SearchCenter> {
        self.search_center
    }

    #[must_use]
    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }
}
