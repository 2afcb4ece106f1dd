//! Surtigo - cheapest-fuel-nearby engine
//!
//! This library provides the core for locating fuel stations around a point
//! of interest, ranking them by pump price, and presenting them on an
//! interactive map with price-aware styling.

pub mod catalog;
pub mod config;
pub mod error;
pub mod geolocator;
pub mod map;
pub mod models;
pub mod providers;
pub mod theme;

// Re-export core types for public API
pub use catalog::{DerivedView, StationCatalog};
pub use config::SurtigoConfig;
pub use error::{FetchError, LocationError, SurtigoError};
pub use geolocator::{FixedLocationSensor, GeoLocator, LocationSensor, PositionRequest};
pub use map::{MapEvent, MapPresenter, MapSurface};
pub use models::{FuelKind, FuelPrices, GeoPoint, SearchCenter, Station};
pub use providers::{Geocoder, HttpStationProvider, NominatimGeocoder, StationProvider};
pub use theme::{Theme, ThemeSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SurtigoError>;
