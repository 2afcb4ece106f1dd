//! Marker styling and popup content
//!
//! Encodes price rank into marker iconography: the three cheapest stations
//! get top styling with a rank badge, anything under the current average gets
//! a cheap accent, the rest stay neutral.

use crate::map::surface::{MarkerStyle, PriceRow, StationMarker, StationPopup};
use crate::models::{FuelKind, Station};

/// How many of the cheapest stations get top styling
pub const TOP_RANK_COUNT: usize = 3;

/// Popup text when the station does not sell the selected fuel
const NO_PRICE_TEXT: &str = "No data";

/// Classify a station's marker by rank and cheapness.
///
/// `rank` is 1-based within the sorted view. Rank alone is not enough for
/// top styling: a station with no price for the selected fuel stays neutral
/// even at the head of the list.
#[must_use]
pub fn style_for(rank: usize, price: Option<f64>, average_price: f64) -> MarkerStyle {
    let is_top = rank <= TOP_RANK_COUNT && price.is_some();
    if is_top {
        return MarkerStyle::Top { rank: rank as u8 };
    }
    match price {
        Some(p) if average_price > 0.0 && p < average_price => MarkerStyle::Cheap,
        _ => MarkerStyle::Neutral,
    }
}

/// Format a pump price for display
#[must_use]
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("{p:.3} €/L"),
        None => NO_PRICE_TEXT.to_string(),
    }
}

/// Format a distance: meters below one kilometer, otherwise one decimal km
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{km:.1} km")
    }
}

/// Build the interactive marker for one ranked station
#[must_use]
pub fn build_marker(
    station: &Station,
    rank: usize,
    fuel: FuelKind,
    average_price: f64,
) -> StationMarker {
    let price = station.price_of(fuel);
    let style = style_for(rank, price, average_price);

    StationMarker {
        station_id: station.id.clone(),
        position: station.position(),
        style,
        popup: build_popup(station, style, fuel),
    }
}

fn build_popup(station: &Station, style: MarkerStyle, fuel: FuelKind) -> StationPopup {
    let rank_badge = match style {
        MarkerStyle::Top { rank } => Some(rank),
        _ => None,
    };

    let locality_line = match (station.locality.as_deref(), station.region.as_deref()) {
        (Some(locality), Some(region)) => format!("{locality} · {region}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    };

    let other_prices = station
        .known_prices()
        .into_iter()
        .filter(|(kind, _)| *kind != fuel)
        .map(|(kind, price)| PriceRow {
            label: kind.short_label(),
            text: format!("{price:.3}"),
        })
        .collect();

    StationPopup {
        rank_badge,
        title: station.name.clone(),
        locality_line,
        brand: station.brand.clone(),
        fuel_label: fuel.label(),
        price_text: format_price(station.price_of(fuel)),
        distance_text: station.distance_km.map(format_distance),
        opening_hours: station.opening_hours.clone(),
        other_prices,
    }
}
