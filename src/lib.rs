#![doc = include_str!("../README.md")]

pub mod distance;
mod error;
mod geocoder;
pub mod ingest;
pub mod kdtree;
pub mod ordering;
mod record;

pub use error::{GeocodeError, Result};
pub use geocoder::ReverseGeocoder;
pub use record::{Axis, CityRecord};

#[cfg(test)]
pub(crate) mod test;
