//! Look up the city nearest to a coordinate in a geonames export.
//!
//! ```text
//! cargo run --example reverse_geocode --features serde -- \
//!     --data geonames.csv --lat 44.03 --lon -79.30 -k 3
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use reverse_geocode::distance::haversine;
use reverse_geocode::ingest::CsvLayout;
use reverse_geocode::{CityRecord, ReverseGeocoder};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Offline reverse geocoding over a semicolon-delimited geonames export.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the dataset
    #[arg(long, value_name = "FILE")]
    data: PathBuf,

    /// Query latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Query longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Number of neighbors to return
    #[arg(short, long, default_value_t = 1)]
    k: isize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn print_results(args: &Args, cities: &[&CityRecord]) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(cities)?);
        return Ok(());
    }

    for city in cities {
        let km = haversine(args.lat, args.lon, city.latitude, city.longitude);
        println!("{city} - {km:.1} km");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let geocoder = ReverseGeocoder::from_path(&args.data, &CsvLayout::default())
        .with_context(|| format!("failed to load {}", args.data.display()))?;

    let start = Instant::now();
    let cities = if args.k == 1 {
        geocoder.nearest(args.lat, args.lon).into_iter().collect()
    } else {
        geocoder.nearest_k(args.lat, args.lon, args.k)?
    };
    info!(elapsed = ?start.elapsed(), "query finished");

    print_results(&args, &cities)
}
