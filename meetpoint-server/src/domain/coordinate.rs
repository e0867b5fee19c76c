//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180];
/// `Coordinate::new` is the only way to build one, so holders can rely on
/// that range.
///
/// # Examples
///
/// ```
/// use meetpoint_server::domain::Coordinate;
///
/// let tokyo = Coordinate::new(35.681, 139.767).unwrap();
/// assert_eq!(tokyo.lat(), 35.681);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    /// Create a coordinate, validating both components.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another coordinate, in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        distance_km(*self, *other)
    }

    /// Arithmetic mean of latitudes and longitudes.
    ///
    /// This is a planar average, not a spherical centroid. It is fine at
    /// national scale but drifts for point sets spanning the antimeridian
    /// or sitting near a pole.
    ///
    /// Returns `None` for an empty slice.
    pub fn centroid(points: &[Coordinate]) -> Option<Coordinate> {
        if points.is_empty() {
            return None;
        }
        let count = points.len() as f64;
        let lat = points.iter().map(|p| p.lat).sum::<f64>() / count;
        let lon = points.iter().map(|p| p.lon).sum::<f64>() / count;
        // The mean of in-range values is in range.
        Some(Coordinate { lat, lon })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine distance between two coordinates, in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for near-antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    /// A point and a neighbour of its antipode.
    fn near_antipodal_pair() -> impl Strategy<Value = (Coordinate, Coordinate)> {
        (-90.0f64..=90.0, -180.0f64..=0.0, -1e-6f64..=1e-6).prop_map(|(lat, lon, jitter)| {
            let a = Coordinate::new(lat, lon).unwrap();
            let b = Coordinate::new((-lat + jitter).clamp(-90.0, 90.0), lon + 180.0).unwrap();
            (a, b)
        })
    }

    proptest! {
        /// Distance from a point to itself is zero
        #[test]
        fn self_distance_zero(a in any_coordinate()) {
            prop_assert!(distance_km(a, a).abs() < 1e-9);
        }

        /// Distance is symmetric
        #[test]
        fn symmetric(a in any_coordinate(), b in any_coordinate()) {
            prop_assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
        }

        /// Distance is non-negative and bounded by half the circumference
        #[test]
        fn bounded(a in any_coordinate(), b in any_coordinate()) {
            let d = distance_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        /// Near-antipodal pairs stay finite and bounded
        #[test]
        fn bounded_near_antipode((a, b) in near_antipodal_pair()) {
            let d = distance_km(a, b);
            prop_assert!(d.is_finite());
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        /// The centroid of valid points is itself a valid coordinate
        #[test]
        fn centroid_in_range(points in proptest::collection::vec(any_coordinate(), 1..20)) {
            let c = Coordinate::centroid(&points).unwrap();
            prop_assert!(Coordinate::new(c.lat(), c.lon()).is_ok());
        }
    }
}
