//! Distance metrics for nearest-neighbor queries.
//!
//! Two metrics are supported and are kept as separate types: great-circle distance in kilometers
//! and squared planar distance in degree-space. Inputs are latitude/longitude pairs in degrees;
//! behavior for non-finite inputs is unspecified.

use std::f64::consts::FRAC_PI_2;

use crate::record::Axis;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance in kilometers between two latitude/longitude pairs.
#[inline]
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_with_radius(lat1, lon1, lat2, lon2, EARTH_RADIUS_KM)
}

#[inline]
fn haversine_with_radius(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    let a = sin_lat * sin_lat
        + lat1.to_radians().cos() * lat2.to_radians().cos() * sin_lon * sin_lon;
    let c = 2.0 * f64::atan2(a.sqrt(), (1.0 - a).sqrt());

    radius * c
}

/// Squared Euclidean distance treating degrees as a flat plane.
///
/// Only meaningful for relative comparisons; never a physical distance.
#[inline]
pub fn planar_squared(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = lat1 - lat2;
    let d_lon = lon1 - lon2;
    d_lat * d_lat + d_lon * d_lon
}

/// A metric used to rank and prune candidates during a tree search.
///
/// A single query uses one metric for both ranking and pruning.
pub trait DistanceMetric {
    /// Distance between two latitude/longitude pairs.
    fn distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64;

    /// A lower bound on the distance from `(lat, lon)` to any point whose `axis` coordinate lies
    /// on the other side of `split`.
    ///
    /// Compared against the current best distance when deciding whether the far side of a
    /// splitting plane must be searched.
    fn axis_distance(&self, axis: Axis, lat: f64, lon: f64, split: f64) -> f64;
}

/// Central angle in radians from a point to the half meridian at longitude `meridian`.
fn meridian_angle(lat: f64, lon: f64, meridian: f64) -> f64 {
    let d_lon = (lon - meridian).rem_euclid(360.0);
    let d_lon = d_lon.min(360.0 - d_lon);
    let lat = lat.to_radians();
    if d_lon >= 90.0 {
        // closest point of the half meridian is the pole in the query's hemisphere
        (FRAC_PI_2 - lat.abs()).max(0.0)
    } else {
        (d_lon.to_radians().sin() * lat.cos()).asin()
    }
}

/// Great-circle distance metric.
///
/// Distances are in kilometers. A latitude split is bounded by the meridian arc between the
/// parallels. A longitude split is bounded by the nearer of the split meridian and the
/// antimeridian, so regions that wrap around ±180° or reach a pole are still searched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircle {
    /// Earth's radius in kilometers
    pub earth_radius: f64,
}

impl Default for GreatCircle {
    fn default() -> Self {
        Self {
            earth_radius: EARTH_RADIUS_KM,
        }
    }
}

impl GreatCircle {
    /// Create a great-circle metric with a custom Earth radius, in kilometers.
    pub fn with_radius(earth_radius: f64) -> Self {
        Self { earth_radius }
    }
}

impl DistanceMetric for GreatCircle {
    #[inline]
    fn distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        haversine_with_radius(lat1, lon1, lat2, lon2, self.earth_radius)
    }

    fn axis_distance(&self, axis: Axis, lat: f64, lon: f64, split: f64) -> f64 {
        let angle = match axis {
            Axis::Latitude => (lat - split).abs().to_radians(),
            Axis::Longitude => {
                meridian_angle(lat, lon, split).min(meridian_angle(lat, lon, 180.0))
            }
        };
        self.earth_radius * angle
    }
}

/// Squared planar distance metric in degree-space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanarSquared;

impl DistanceMetric for PlanarSquared {
    #[inline]
    fn distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        planar_squared(lat1, lon1, lat2, lon2)
    }

    #[inline]
    fn axis_distance(&self, axis: Axis, lat: f64, lon: f64, split: f64) -> f64 {
        let gap = axis.select(lat, lon) - split;
        gap * gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_0_31::algorithm::{Distance, Haversine};
    use geo_0_31::Point;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const NEW_YORK: (f64, f64) = (40.7128, -74.0060);
    const LOS_ANGELES: (f64, f64) = (34.0522, -118.2437);
    const LONDON: (f64, f64) = (51.5074, -0.1278);
    const PARIS: (f64, f64) = (48.8566, 2.3522);

    #[test]
    fn test_known_distances() {
        let d = haversine(NEW_YORK.0, NEW_YORK.1, LOS_ANGELES.0, LOS_ANGELES.1);
        assert!((d - 3935.9).abs() < 5.0, "New York to Los Angeles: {d}");

        let d = haversine(LONDON.0, LONDON.1, PARIS.0, PARIS.1);
        assert!((d - 346.3).abs() < 5.0, "London to Paris: {d}");
    }

    #[test]
    fn test_identical_points() {
        assert_eq!(haversine(NEW_YORK.0, NEW_YORK.1, NEW_YORK.0, NEW_YORK.1), 0.0);
        assert_eq!(planar_squared(LONDON.0, LONDON.1, LONDON.0, LONDON.1), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let ab = haversine(LONDON.0, LONDON.1, LOS_ANGELES.0, LOS_ANGELES.1);
        let ba = haversine(LOS_ANGELES.0, LOS_ANGELES.1, LONDON.0, LONDON.1);
        assert!((ab - ba).abs() < 1e-9);

        let ab = planar_squared(PARIS.0, PARIS.1, NEW_YORK.0, NEW_YORK.1);
        let ba = planar_squared(NEW_YORK.0, NEW_YORK.1, PARIS.0, PARIS.1);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_planar_squared() {
        assert_eq!(planar_squared(0.0, 0.0, 3.0, 4.0), 25.0);
        assert_eq!(PlanarSquared.axis_distance(Axis::Latitude, 1.0, 50.0, 4.0), 9.0);
        assert_eq!(PlanarSquared.axis_distance(Axis::Longitude, 1.0, -2.0, 2.0), 16.0);
    }

    #[test]
    fn test_matches_geo_haversine() {
        // geo uses a mean radius of 6371.0088 km, so allow a small relative difference.
        let pairs = [(NEW_YORK, LOS_ANGELES), (LONDON, PARIS), (PARIS, LOS_ANGELES)];
        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let ours = haversine(lat1, lon1, lat2, lon2);
            let theirs =
                Haversine.distance(Point::new(lon1, lat1), Point::new(lon2, lat2)) / 1000.0;
            assert!((ours - theirs).abs() / theirs < 1e-5, "{ours} vs {theirs}");
        }
    }

    #[test]
    fn test_custom_radius() {
        let unit = GreatCircle::with_radius(1.0);
        let d = unit.distance(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI).abs() < 1e-6);

        let bound = unit.axis_distance(Axis::Latitude, 10.0, 0.0, 40.0);
        assert!((bound - 30f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_axis_distance_wraps_the_antimeridian() {
        let metric = GreatCircle::default();
        // far side of a split at 0° reaches the query's neighbors just across ±180°
        let bound = metric.axis_distance(Axis::Longitude, -43.15, 179.81, 0.0);
        let across = haversine(-43.15, 179.81, -43.15, -179.9);
        assert!(bound <= across, "{bound} > {across}");
        assert!(bound < 20.0);
    }

    #[test]
    fn test_axis_distance_near_the_pole() {
        let metric = GreatCircle::default();
        // every meridian is within the pole distance
        let bound = metric.axis_distance(Axis::Longitude, 88.69, -177.25, 2.75);
        assert!(bound <= haversine(88.69, -177.25, 90.0, 0.0) + 1e-9);
        assert!(bound <= haversine(88.69, -177.25, 89.5, 10.0));
    }

    #[test]
    fn test_axis_distance_is_a_lower_bound() {
        let mut rng = StdRng::seed_from_u64(17);
        let metric = GreatCircle::default();
        for _ in 0..5000 {
            let (lat, lon) = (rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0));
            let (other_lat, other_lon) = (rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0));
            let distance = haversine(lat, lon, other_lat, other_lon);

            // a split strictly between the two points on either axis
            for (axis, split) in [
                (Axis::Latitude, (lat + other_lat) / 2.0),
                (Axis::Longitude, (lon + other_lon) / 2.0),
            ] {
                let bound = metric.axis_distance(axis, lat, lon, split);
                assert!(
                    bound <= distance + 1e-9,
                    "{axis:?} split {split}: {bound} > {distance} from ({lat}, {lon}) to ({other_lat}, {other_lon})"
                );
            }
        }
    }

    #[test]
    fn test_triangle_inequality() {
        let ab = haversine(NEW_YORK.0, NEW_YORK.1, LONDON.0, LONDON.1);
        let bc = haversine(LONDON.0, LONDON.1, PARIS.0, PARIS.1);
        let ac = haversine(NEW_YORK.0, NEW_YORK.1, PARIS.0, PARIS.1);
        assert!(ac <= ab + bc);
    }
}
