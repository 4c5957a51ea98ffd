use std::io::Read;
use std::path::Path;
use std::time::Instant;

use geo_traits::CoordTrait;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::ingest::{read_records, read_records_from_path, CsvLayout};
use crate::kdtree::{KDTree, KDTreeIndex};
use crate::record::CityRecord;

/// Offline reverse geocoder: answers "which known city is closest to this coordinate".
///
/// The geocoder owns an immutable [`KDTree`] built once from the full record list. All queries take
/// `&self`, so a geocoder can be shared across threads once constructed.
///
/// ```
/// use reverse_geocode::{CityRecord, ReverseGeocoder};
///
/// let geocoder = ReverseGeocoder::new(vec![
///     CityRecord::new(43.65, -79.38, "Moss Park", "CA"),
///     CityRecord::new(45.50, -73.56, "Montréal", "CA"),
/// ]);
/// let city = geocoder.nearest(44.03, -79.30).unwrap();
/// assert_eq!(city.name, "Moss Park");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReverseGeocoder {
    tree: KDTree,
}

impl ReverseGeocoder {
    /// Build a geocoder over `records`.
    pub fn new(records: Vec<CityRecord>) -> Self {
        let start = Instant::now();
        let tree = KDTree::from_records(records);
        info!(
            num_items = tree.len(),
            elapsed = ?start.elapsed(),
            "built reverse geocoder"
        );
        Self { tree }
    }

    /// Parse a delimited dataset and build a geocoder over it.
    pub fn from_reader<R: Read>(reader: R, layout: &CsvLayout) -> Result<Self> {
        let start = Instant::now();
        let records = read_records(reader, layout)?;
        info!(num_records = records.len(), elapsed = ?start.elapsed(), "parsed dataset");
        Ok(Self::new(records))
    }

    /// Parse a delimited dataset from disk and build a geocoder over it.
    pub fn from_path(path: impl AsRef<Path>, layout: &CsvLayout) -> Result<Self> {
        let start = Instant::now();
        let records = read_records_from_path(path, layout)?;
        info!(num_records = records.len(), elapsed = ?start.elapsed(), "parsed dataset");
        Ok(Self::new(records))
    }

    /// The underlying tree.
    pub fn tree(&self) -> &KDTree {
        &self.tree
    }

    /// The number of cities known to this geocoder.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if no cities are loaded.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The city closest to the given latitude/longitude by great-circle distance.
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<&CityRecord> {
        self.tree.nearest(lat, lon)
    }

    /// The city closest to a coordinate, where `x` is longitude and `y` is latitude.
    pub fn nearest_coord(&self, coord: &impl CoordTrait<T = f64>) -> Option<&CityRecord> {
        self.tree.nearest_coord(coord)
    }

    /// The `k` cities closest to the given latitude/longitude, nearest first. `k` must be at
    /// least 2.
    pub fn nearest_k(&self, lat: f64, lon: f64, k: isize) -> Result<Vec<&CityRecord>> {
        self.tree.nearest_k(lat, lon, k)
    }

    /// Answer many `(lat, lon)` queries at once, in input order.
    pub fn nearest_many(&self, queries: &[(f64, f64)]) -> Vec<Option<&CityRecord>> {
        #[cfg(feature = "rayon")]
        let queries = queries.par_iter();
        #[cfg(not(feature = "rayon"))]
        let queries = queries.iter();

        queries
            .map(|&(lat, lon)| self.nearest(lat, lon))
            .collect()
    }
}

impl From<KDTree> for ReverseGeocoder {
    fn from(tree: KDTree) -> Self {
        Self { tree }
    }
}

impl FromIterator<CityRecord> for ReverseGeocoder {
    fn from_iter<I: IntoIterator<Item = CityRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
