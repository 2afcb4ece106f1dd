//! Fuel station domain model
//!
//! A [`Station`] is immutable per fetch: the catalog replaces the whole list
//! on every successful load instead of merging increments.

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// The fuel categories tracked per station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuelKind {
    Regular95,
    Regular98,
    Diesel,
    DieselPremium,
    Lpg,
}

impl FuelKind {
    /// All supported kinds, in display order
    pub const ALL: [FuelKind; 5] = [
        FuelKind::Regular95,
        FuelKind::Regular98,
        FuelKind::Diesel,
        FuelKind::DieselPremium,
        FuelKind::Lpg,
    ];

    /// Full label for headlines and popups
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FuelKind::Regular95 => "Regular 95",
            FuelKind::Regular98 => "Regular 98",
            FuelKind::Diesel => "Diesel",
            FuelKind::DieselPremium => "Diesel Premium",
            FuelKind::Lpg => "LPG",
        }
    }

    /// Compact label for the popup price table
    #[must_use]
    pub fn short_label(&self) -> &'static str {
        match self {
            FuelKind::Regular95 => "R95",
            FuelKind::Regular98 => "R98",
            FuelKind::Diesel => "Diesel",
            FuelKind::DieselPremium => "D.Prem",
            FuelKind::Lpg => "LPG",
        }
    }
}

impl std::fmt::Display for FuelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-kind pump prices. `None` means the station does not sell that kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelPrices {
    pub regular95: Option<f64>,
    pub regular98: Option<f64>,
    pub diesel: Option<f64>,
    pub diesel_premium: Option<f64>,
    pub lpg: Option<f64>,
}

/// A fuel station as consolidated for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Backend identity, opaque to the core
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Administrative region (province)
    pub region: Option<String>,
    pub locality: Option<String>,
    pub brand: Option<String>,
    /// Free-form opening hours text
    pub opening_hours: Option<String>,
    /// Kilometers from the search reference, when the backend supplies it
    pub distance_km: Option<f64>,
    pub prices: FuelPrices,
}

impl Station {
    /// Price of the given fuel kind at this station.
    ///
    /// This is the single source of the kind-to-field mapping; every ranking,
    /// average and popup goes through it.
    #[must_use]
    pub fn price_of(&self, kind: FuelKind) -> Option<f64> {
        match kind {
            FuelKind::Regular95 => self.prices.regular95,
            FuelKind::Regular98 => self.prices.regular98,
            FuelKind::Diesel => self.prices.diesel,
            FuelKind::DieselPremium => self.prices.diesel_premium,
            FuelKind::Lpg => self.prices.lpg,
        }
    }

    /// All kinds this station sells, with their prices, in display order
    #[must_use]
    pub fn known_prices(&self) -> Vec<(FuelKind, f64)> {
        FuelKind::ALL
            .iter()
            .filter_map(|kind| self.price_of(*kind).map(|price| (*kind, price)))
            .collect()
    }

    #[must_use]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Whether a non-empty, lowercased query matches any searchable field
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let field_matches = |field: &str| field.to_lowercase().contains(query);
        field_matches(&self.name)
            || field_matches(&self.address)
            || self.locality.as_deref().is_some_and(field_matches)
            || self.region.as_deref().is_some_and(field_matches)
    }
}

/// Round to 3 decimals, the precision used for prices and fetch distances
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
