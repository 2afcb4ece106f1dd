//! Data models for the Surtigo core
//!
//! - Location: geographic points and the active search center
//! - Station: fuel stations and per-kind prices

pub mod location;
pub mod station;

pub use location::{GeoPoint, SearchCenter};
pub use station::{round3, FuelKind, FuelPrices, Station};
