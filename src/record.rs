use std::fmt;

use geo_traits::{CoordTrait, Dimensions};

/// A single city in the dataset.
///
/// Records carry no identity beyond their field values. Duplicates are allowed and are kept as
/// distinct nodes in the tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityRecord {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// City display name
    pub name: String,
    /// Country code
    pub country: String,
}

impl CityRecord {
    /// Create a new record.
    pub fn new(
        latitude: f64,
        longitude: f64,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            name: name.into(),
            country: country.into(),
        }
    }

    /// The coordinate of this record along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis) -> f64 {
        axis.select(self.latitude, self.longitude)
    }
}

impl fmt::Display for CityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} ({}, {})",
            self.name, self.country, self.latitude, self.longitude
        )
    }
}

/// Records are usable directly as query coordinates: `x` is longitude and `y` is latitude.
impl CoordTrait for CityRecord {
    type T = f64;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.longitude
    }

    fn y(&self) -> Self::T {
        self.latitude
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.longitude,
            1 => self.latitude,
            _ => panic!("Invalid index of coord"),
        }
    }
}

/// The coordinate dimension a tree node is split on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Axis 0
    Latitude,
    /// Axis 1
    Longitude,
}

impl Axis {
    /// The splitting axis used at a given tree depth (`depth mod 2`).
    #[inline]
    pub fn from_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Axis::Latitude
        } else {
            Axis::Longitude
        }
    }

    /// 0 for latitude, 1 for longitude.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::Latitude => 0,
            Axis::Longitude => 1,
        }
    }

    /// The axis used one level further down the tree.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Axis::Latitude => Axis::Longitude,
            Axis::Longitude => Axis::Latitude,
        }
    }

    /// Pick the value for this axis out of a latitude/longitude pair.
    #[inline]
    pub fn select(self, latitude: f64, longitude: f64) -> f64 {
        match self {
            Axis::Latitude => latitude,
            Axis::Longitude => longitude,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn axis_alternates_with_depth() {
        assert_eq!(Axis::from_depth(0), Axis::Latitude);
        assert_eq!(Axis::from_depth(1), Axis::Longitude);
        assert_eq!(Axis::from_depth(6), Axis::Latitude);
        assert_eq!(Axis::from_depth(7).index(), 1);
        assert_eq!(Axis::Latitude.next(), Axis::Longitude);
        assert_eq!(Axis::Longitude.next(), Axis::Latitude);
    }

    #[test]
    fn record_as_coord() {
        let paris = CityRecord::new(48.85, 2.35, "Paris", "FR");
        assert_eq!(paris.x(), 2.35);
        assert_eq!(paris.y(), 48.85);
        assert_eq!(paris.coord(Axis::Latitude), 48.85);
        assert_eq!(paris.coord(Axis::Longitude), 2.35);
        assert_eq!(paris.to_string(), "Paris, FR (48.85, 2.35)");
    }
}
