//! Free-text place geocoding
//!
//! Resolves user text like "toledo" into coordinates. Only the single best
//! match is ever used; the query is qualified with the configured country so
//! results stay inside the supported area.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::SurtigoConfig;
use crate::error::FetchError;
use crate::models::GeoPoint;

const USER_AGENT: &str = "Surtigo/0.1.0";

/// Resolves free text to its best-match coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the text matched nothing
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, FetchError>;
}

/// One result row from the Nominatim search API
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[allow(dead_code)]
    display_name: String,
}

/// Geocoder backed by the Nominatim search API
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    country_name: String,
    country_codes: String,
}

impl NominatimGeocoder {
    /// Create a new geocoder from configuration
    pub fn new(config: &SurtigoConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.api.timeout_seconds)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.geocoding.base_url.clone(),
            country_name: config.geocoding.country_name.clone(),
            country_codes: config.geocoding.country_codes.clone(),
        })
    }

    fn parse_point(place: &NominatimPlace) -> Result<GeoPoint, FetchError> {
        let latitude = place
            .lat
            .parse::<f64>()
            .map_err(|e| FetchError::Decode(format!("Bad latitude in geocoding result: {e}")))?;
        let longitude = place
            .lon
            .parse::<f64>()
            .map_err(|e| FetchError::Decode(format!("Bad longitude in geocoding result: {e}")))?;
        Ok(GeoPoint::new(latitude, longitude))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, FetchError> {
        let qualified = format!("{}, {}", query, self.country_name);
        debug!("Geocoding place query: {qualified}");

        let url = format!(
            "{}/search?q={}&format=json&limit=1&countrycodes={}",
            self.base_url,
            urlencoding::encode(&qualified),
            self.country_codes
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Geocoding request failed: {e}")))?
            .error_for_status()
            .map_err(|e| FetchError::Network(format!("Geocoding backend error: {e}")))?;

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("Failed to parse geocoding response: {e}")))?;

        match places.first() {
            Some(best) => Ok(Some(Self::parse_point(best)?)),
            None => {
                debug!("No geocoding match for: {qualified}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_from_nominatim_strings() {
        let place = NominatimPlace {
            lat: "40.4167754".to_string(),
            lon: "-3.7037902".to_string(),
            display_name: "Madrid, Spain".to_string(),
        };
        let point = NominatimGeocoder::parse_point(&place).unwrap();
        assert!((point.latitude - 40.4167754).abs() < 1e-9);
        assert!((point.longitude - -3.7037902).abs() < 1e-9);
    }

    #[test]
    fn test_parse_point_rejects_garbage() {
        let place = NominatimPlace {
            lat: "not-a-number".to_string(),
            lon: "-3.7".to_string(),
            display_name: "Nowhere".to_string(),
        };
        assert!(matches!(
            NominatimGeocoder::parse_point(&place),
            Err(FetchError::Decode(_))
        ));
    }
}
