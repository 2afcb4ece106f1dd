//! Station backend client
//!
//! The backend answers radius queries with raw station records; this module
//! owns that wire shape and its mapping into the domain [`Station`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::config::SurtigoConfig;
use crate::error::FetchError;
use crate::models::{round3, FuelPrices, Station};

const USER_AGENT: &str = "Surtigo/0.1.0";

/// Fallback display name for stations the backend returns without one
const UNKNOWN_STATION_NAME: &str = "Unknown station";

/// Source of raw station records around a point
#[async_trait]
pub trait StationProvider: Send + Sync {
    /// Fetch stations within `radius_km` of the given point, at most `limit`
    async fn fetch_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        limit: u32,
    ) -> Result<Vec<RawStationRecord>, FetchError>;
}

/// Raw station record as served by the radius endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawStationRecord {
    pub id: u64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Option<String>,
    pub locality: Option<String>,
    pub brand: Option<String>,
    pub opening_hours: Option<String>,
    /// Kilometers from the query point, as computed by the backend
    pub distance_km: Option<f64>,
    pub regular95: Option<f64>,
    pub regular98: Option<f64>,
    pub diesel: Option<f64>,
    pub diesel_premium: Option<f64>,
    pub lpg: Option<f64>,
}

impl RawStationRecord {
    /// Consolidate a raw record into the presentation model.
    ///
    /// Absent optional fields stay absent; they are never defaulted to zero.
    #[must_use]
    pub fn into_station(self) -> Station {
        Station {
            id: self.id.to_string(),
            name: self
                .name
                .unwrap_or_else(|| UNKNOWN_STATION_NAME.to_string()),
            address: self.address.unwrap_or_default(),
            latitude: self.latitude,
            longitude: self.longitude,
            region: self.region,
            locality: self.locality,
            brand: self.brand,
            opening_hours: self.opening_hours,
            distance_km: self.distance_km.map(round3),
            prices: FuelPrices {
                regular95: self.regular95,
                regular98: self.regular98,
                diesel: self.diesel,
                diesel_premium: self.diesel_premium,
                lpg: self.lpg,
            },
        }
    }
}

/// HTTP client for the station backend
pub struct HttpStationProvider {
    client: Client,
    base_url: String,
}

impl HttpStationProvider {
    /// Create a new client from configuration
    pub fn new(config: &SurtigoConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.api.timeout_seconds)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api.base_url.clone(),
        })
    }
}

#[async_trait]
impl StationProvider for HttpStationProvider {
    async fn fetch_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        limit: u32,
    ) -> Result<Vec<RawStationRecord>, FetchError> {
        info!(
            "Fetching stations within {}km of ({}, {})",
            radius_km, latitude, longitude
        );

        let url = format!("{}/stations/radius", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("radius_km", radius_km.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Station request failed: {e}")))?
            .error_for_status()
            .map_err(|e| FetchError::Network(format!("Station backend error: {e}")))?;

        let records: Vec<RawStationRecord> = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("Failed to parse station response: {e}")))?;

        info!("Received {} station records", records.len());
        Ok(records)
    }
}
