//! Shared fixtures for tests across the crate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::DistanceMetric;
use crate::CityRecord;


/// A handful of world cities.
pub(crate) fn world_cities() -> Vec<CityRecord> {
    [
        (40.71, -74.00, "New York City", "US"),
        (37.77, -122.42, "San Francisco", "US"),
        (51.5072, -0.1275, "London", "GB"),
        (35.6828, 139.7594, "Tokyo", "JP"),
        (-33.8678, 151.2100, "Sydney", "AU"),
        (30.04, 31.23, "Cairo", "EG"),
        (-22.9111, -43.2056, "Rio de Janeiro", "BR"),
        (48.85, 2.35, "Paris", "FR"),
        (-33.9253, 18.4239, "Cape Town", "ZA"),
        (39.90, 116.40, "Beijing", "CN"),
        (19.43, -99.13, "Mexico City", "MX"),
        (43.7417, -79.3733, "Bridle Path-Sunnybrook-York Mills", "CA"),
        (43.65, -79.38, "Moss Park", "CA"),
        (44.30, -78.31, "Peterborough", "CA"),
        (45.50, -73.56, "Montréal", "CA"),
        (52.23, 21.01, "Warsaw", "PL"),
    ]
    .into_iter()
    .map(|(lat, lon, name, country)| CityRecord::new(lat, lon, name, country))
    .collect()
}

/// Random cities inside a latitude/longitude box, named by their generation order.
pub(crate) fn random_cities(
    n: usize,
    seed: u64,
    lat_range: (f64, f64),
    lon_range: (f64, f64),
) -> Vec<CityRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let lat = rng.gen_range(lat_range.0..lat_range.1);
            let lon = rng.gen_range(lon_range.0..lon_range.1);
            CityRecord::new(lat, lon, format!("city-{i}"), "XX")
        })
        .collect()
}

/// Random query points inside a latitude/longitude box.
pub(crate) fn random_queries(
    n: usize,
    seed: u64,
    lat_range: (f64, f64),
    lon_range: (f64, f64),
) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            (
                rng.gen_range(lat_range.0..lat_range.1),
                rng.gen_range(lon_range.0..lon_range.1),
            )
        })
        .collect()
}

/// All distances from a query to `records` under `metric`, ascending.
pub(crate) fn brute_force_distances(
    records: &[CityRecord],
    lat: f64,
    lon: f64,
    metric: &impl DistanceMetric,
) -> Vec<f64> {
    let mut distances: Vec<f64> = records
        .iter()
        .map(|r| metric.distance(lat, lon, r.latitude, r.longitude))
        .collect();
    distances.sort_by(f64::total_cmp);
    distances
}
