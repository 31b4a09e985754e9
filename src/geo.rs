//! Geographic primitives: GPS fixes and great-circle distances.

use chrono::{DateTime, Utc};

/// Mean Earth radius in kilometres, for the spherical distance model.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A single GPS fix of a recorded flight.
///
/// Latitude and longitude are geodetic degrees. Altitude and timestamp are
/// carried through from the flight recorder when available; the optimizers
/// never read them.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Latitude in degrees, positive north.
    pub lat: f64,

    /// Longitude in degrees, positive east.
    pub lon: f64,

    /// GNSS altitude in metres, if the recorder provided one.
    pub altitude: Option<f64>,

    /// Time of the fix.
    pub time: Option<DateTime<Utc>>,
}

impl Point {
    /// Creates a point from latitude/longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Point {
            lat,
            lon,
            altitude: None,
            time: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Great-circle distance to `other` in kilometres.
    ///
    /// Haversine formula over a sphere of radius [`EARTH_RADIUS_KM`].
    /// Symmetric, non-negative, and zero for identical coordinates. This is
    /// the single expensive primitive of the crate; search loops read the
    /// precomputed [`LegMatrix`](crate::cache::LegMatrix) instead of calling
    /// it per candidate.
    pub fn distance(&self, other: &Point) -> f64 {
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_identical_points_is_zero() {
        let p = Point::new(44.886_383, 5.210_55);
        assert_eq!(p.distance(&p), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Point::new(44.886_383, 5.210_55);
        let b = Point::new(43.896_667, 6.253_333);
        assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-12);
    }

    #[test]
    fn test_distance_one_degree_along_equator() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 1.0);
        // One degree of arc on a 6371 km sphere.
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((a.distance(&b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_distance_non_negative() {
        let a = Point::new(-33.856_78, 151.215_3);
        let b = Point::new(40.748_44, -73.985_66);
        assert!(a.distance(&b) > 0.0);
    }

    #[test]
    fn test_metadata_carried_through() {
        let p = Point::new(1.0, 2.0).with_altitude(1250.0);
        assert_eq!(p.altitude, Some(1250.0));
        assert_eq!(p.time, None);
    }
}
