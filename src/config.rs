//! Configuration management for the Surtigo core
//!
//! Handles loading configuration from files and environment variables, and
//! provides validation for all configuration settings.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::SurtigoError;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurtigoConfig {
    /// Station backend configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Geocoding configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Default search settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Station backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the station API
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u32,
}

/// Geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Country appended to every free-text query
    #[serde(default = "default_country_name")]
    pub country_name: String,
    /// Country-code filter passed to the geocoder
    #[serde(default = "default_country_codes")]
    pub country_codes: String,
}

/// Default search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Search radius in kilometers
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    /// Maximum number of stations per load
    #[serde(default = "default_station_limit")]
    pub station_limit: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_api_base_url() -> String {
    "https://api.surtigo.app/v1".to_string()
}

fn default_api_timeout() -> u32 {
    30
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_country_name() -> String {
    "Spain".to_string()
}

fn default_country_codes() -> String {
    "es".to_string()
}

fn default_radius_km() -> f64 {
    20.0
}

fn default_station_limit() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_seconds: default_api_timeout(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            country_name: default_country_name(),
            country_codes: default_country_codes(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            station_limit: default_station_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for SurtigoConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            geocoding: GeocodingConfig::default(),
            defaults: DefaultsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SurtigoConfig {
    /// Load configuration from an optional file plus `SURTIGO_*` environment
    /// overrides
    pub fn load(config_path: Option<&str>) -> Result<Self, SurtigoError> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        } else {
            builder = builder.add_source(File::with_name("config/default").required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("SURTIGO")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: SurtigoConfig = builder
            .build()
            .map_err(|e| SurtigoError::config(format!("Failed to load configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| SurtigoError::config(format!("Invalid configuration: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate all settings
    pub fn validate(&self) -> Result<(), SurtigoError> {
        if self.api.base_url.is_empty() {
            return Err(SurtigoError::config("api.base_url must not be empty"));
        }
        if self.defaults.radius_km <= 0.0 {
            return Err(SurtigoError::config("defaults.radius_km must be positive"));
        }
        if self.defaults.station_limit == 0 {
            return Err(SurtigoError::config(
                "defaults.station_limit must be positive",
            ));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(SurtigoError::config(format!(
                "logging.level must be a valid level, got '{other}'"
            ))),
        }
    }
}
