use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reverse_geocode::distance::haversine;
use reverse_geocode::kdtree::{KDTree, KDTreeIndex};
use reverse_geocode::CityRecord;

fn generate_cities(n: usize) -> Vec<CityRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let lat = rng.gen_range(-60.0..70.0);
            let lon = rng.gen_range(-180.0..180.0);
            CityRecord::new(lat, lon, format!("city-{i}"), "XX")
        })
        .collect()
}

fn brute_force_nearest(cities: &[CityRecord], lat: f64, lon: f64) -> Option<&CityRecord> {
    cities.iter().min_by(|a, b| {
        haversine(lat, lon, a.latitude, a.longitude)
            .total_cmp(&haversine(lat, lon, b.latitude, b.longitude))
    })
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (lat, lon) = (44.03, -79.30);

    for size in [1_000, 100_000] {
        let cities = generate_cities(size);

        let mut group = c.benchmark_group("construction");
        group.bench_with_input(BenchmarkId::new("kdtree", size), &cities, |b, cities| {
            b.iter(|| KDTree::from_records(cities.clone()))
        });
        group.finish();

        let tree = KDTree::from_records(cities.clone());
        let mut group = c.benchmark_group("nearest");
        group.bench_with_input(BenchmarkId::new("kdtree", size), &tree, |b, tree| {
            b.iter(|| tree.nearest(black_box(lat), black_box(lon)))
        });
        group.bench_with_input(BenchmarkId::new("brute force", size), &cities, |b, cities| {
            b.iter(|| brute_force_nearest(cities, black_box(lat), black_box(lon)))
        });
        group.finish();

        let mut group = c.benchmark_group("nearest_k");
        group.bench_with_input(BenchmarkId::new("kdtree k=10", size), &tree, |b, tree| {
            b.iter(|| tree.nearest_k(black_box(lat), black_box(lon), 10))
        });
        group.finish();
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
