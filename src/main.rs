use anyhow::Result;
use tracing_subscriber::EnvFilter;

use surtigo::{
    FixedLocationSensor, FuelKind, GeoLocator, GeoPoint, HttpStationProvider, NominatimGeocoder,
    StationCatalog, SurtigoConfig,
};

/// Demo entry point: resolve a position (or geocode a place given on the
/// command line), load the stations around it and print them ranked by
/// diesel price.
#[tokio::main]
async fn main() -> Result<()> {
    let config = SurtigoConfig::load(None)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let provider = HttpStationProvider::new(&config)?;
    let geocoder = NominatimGeocoder::new(&config)?;
    let mut catalog = StationCatalog::new(Box::new(provider), Box::new(geocoder), &config);
    catalog.set_selected_fuel(FuelKind::Diesel);

    // Desktop hosts have no position sensor; stand in with the fallback
    // center unless a place name was given.
    let fallback = GeoPoint::new(40.4168, -3.7038);
    let mut locator = GeoLocator::new(Some(Box::new(FixedLocationSensor::new(fallback))));

    match std::env::args().nth(1) {
        Some(place) => catalog.search_by_place_name(&place).await,
        None => {
            let position = match locator.resolve_location().await {
                Ok(position) => position,
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    return Ok(());
                }
            };
            catalog
                .load_around(position, config.defaults.radius_km)
                .await;
        }
    }

    if let Some(message) = catalog.error() {
        eprintln!("{message}");
        return Ok(());
    }

    let Some(center) = catalog.search_center() else {
        println!("Nothing to show; try `surtigo <place name>`.");
        return Ok(());
    };

    let sorted = catalog.sorted_stations();
    println!(
        "Found {} stations within {}km of {}:",
        sorted.len(),
        center.radius_km,
        center.center.format_coordinates()
    );

    for (index, station) in sorted.iter().take(10).enumerate() {
        let price = station
            .price_of(catalog.selected_fuel())
            .map_or("   -   ".to_string(), |p| format!("{p:.3}"));
        let distance = station
            .distance_km
            .map_or(String::new(), |km| format!(" ({km:.1} km)"));
        println!(
            "  #{:<2} {} €/L  {}{}",
            index + 1,
            price,
            station.name,
            distance
        );
    }

    if catalog.average_price() > 0.0 {
        println!(
            "Average {} price: {:.3} €/L (cheapest {:.3})",
            catalog.selected_fuel(),
            catalog.average_price(),
            catalog.cheapest_price().unwrap_or_default()
        );
    }

    Ok(())
}
