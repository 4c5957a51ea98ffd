//! Parsing of delimited city datasets into [`CityRecord`]s.
//!
//! The default layout matches the geonames "cities" export: semicolon-delimited, one header row,
//! the display name in column 1, the country code in column 6 and `"lat, lon"` in column 19.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{GeocodeError, Result};
use crate::record::CityRecord;

/// Column layout of a delimited city dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLayout {
    /// Field delimiter
    pub delimiter: u8,
    /// Whether the first row is a header to skip
    pub has_headers: bool,
    /// Zero-based column of the city display name
    pub name_column: usize,
    /// Zero-based column of the country code
    pub country_column: usize,
    /// Zero-based column of the combined `"lat, lon"` string
    pub coordinates_column: usize,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            delimiter: b';',
            has_headers: true,
            name_column: 1,
            country_column: 6,
            coordinates_column: 19,
        }
    }
}

/// Parse a combined `"lat, lon"` string. Both halves must be finite numbers.
///
/// ```
/// use reverse_geocode::ingest::parse_coordinates;
///
/// assert_eq!(parse_coordinates("43.65, -79.38"), Some((43.65, -79.38)));
/// assert_eq!(parse_coordinates("43.65"), None);
/// assert_eq!(parse_coordinates("NaN, inf"), None);
/// ```
pub fn parse_coordinates(value: &str) -> Option<(f64, f64)> {
    let (lat, lon) = value.split_once(", ")?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
}

/// Read every data row of `reader` into a record.
///
/// Fails on the first row that is too short for `layout` or whose coordinates do not parse. Row
/// numbers in errors count data rows from 1.
pub fn read_records<R: Read>(reader: R, layout: &CsvLayout) -> Result<Vec<CityRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(layout.delimiter)
        .has_headers(layout.has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut records = vec![];
    for (i, row) in reader.records().enumerate() {
        records.push(parse_row(&row?, i + 1, layout)?);
    }

    debug!(num_records = records.len(), "parsed city records");
    Ok(records)
}

/// Read a dataset from a file on disk.
pub fn read_records_from_path(
    path: impl AsRef<Path>,
    layout: &CsvLayout,
) -> Result<Vec<CityRecord>> {
    let file = File::open(path)?;
    read_records(BufReader::new(file), layout)
}

fn parse_row(row: &StringRecord, row_number: usize, layout: &CsvLayout) -> Result<CityRecord> {
    let field = |column: usize| {
        row.get(column).ok_or(GeocodeError::MissingColumn {
            row: row_number,
            column,
        })
    };

    let name = field(layout.name_column)?;
    let country = field(layout.country_column)?;
    let coordinates = field(layout.coordinates_column)?;
    let (latitude, longitude) =
        parse_coordinates(coordinates).ok_or_else(|| GeocodeError::InvalidCoordinates {
            row: row_number,
            value: coordinates.to_string(),
        })?;

    Ok(CityRecord::new(latitude, longitude, name, country))
}
