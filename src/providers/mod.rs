//! External collaborator seams
//!
//! Each backend the core depends on sits behind a trait: the station radius
//! endpoint, the geocoder, and (in [`crate::geolocator`]) the position
//! sensor. HTTP implementations live next to their traits.

pub mod geocoding;
pub mod stations;

pub use geocoding::{Geocoder, NominatimGeocoder};
pub use stations::{HttpStationProvider, RawStationRecord, StationProvider};
