//! Great-circle distance between coordinates.

use crate::constants::EARTH_RADIUS_M;
use crate::domain::values::{Latitude, Longitude};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A longitude/latitude pair as returned by the geocoder. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Converts into range-checked value objects.
    pub fn to_values(self) -> Result<(Latitude, Longitude)> {
        Ok((Latitude::new(self.latitude)?, Longitude::new(self.longitude)?))
    }

    #[inline]
    fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(Latitude, Longitude)> for Coordinate {
    fn from((lat, lon): (Latitude, Longitude)) -> Self {
        Self::new(lon.value(), lat.value())
    }
}

/// Haversine distance in meters on a sphere of radius [`EARTH_RADIUS_M`].
#[inline]
pub fn haversine_distance_m(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Inclusive: a distance exactly equal to `range_m` is in range.
#[inline]
pub fn within_range(distance_m: f64, range_m: f64) -> bool {
    distance_m <= range_m
}

pub fn is_within_range(from: &Coordinate, to: &Coordinate, range_m: f64) -> bool {
    within_range(haversine_distance_m(from, to), range_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DUPLICATE_RADIUS_M;

    const SEONGNAM_CITY_HALL: Coordinate = Coordinate::new(127.1378, 37.4200);
    const SUWON_STATION: Coordinate = Coordinate::new(127.0016, 37.2660);
    const SEOUL_STATION: Coordinate = Coordinate::new(126.9707, 37.5547);

    #[test]
    fn same_point_has_zero_distance() {
        assert_eq!(haversine_distance_m(&SEONGNAM_CITY_HALL, &SEONGNAM_CITY_HALL), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_distance_m(&SEONGNAM_CITY_HALL, &SUWON_STATION);
        let ba = haversine_distance_m(&SUWON_STATION, &SEONGNAM_CITY_HALL);
        assert!((ab - ba).abs() < 1e-9, "{ab} vs {ba}");
    }

    #[test]
    fn known_distance_is_close() {
        // Roughly 21 km between Seoul Station and Seongnam City Hall
        let d = haversine_distance_m(&SEOUL_STATION, &SEONGNAM_CITY_HALL);
        assert!((d - 21_000.0).abs() < 1_500.0, "distance was {d}");
    }

    #[test]
    fn one_thousandth_degree_of_latitude_is_about_111_meters() {
        let north = Coordinate::new(127.1378, 37.4210);
        let d = haversine_distance_m(&SEONGNAM_CITY_HALL, &north);
        assert!((d - 111.19).abs() < 0.1, "distance was {d}");
    }

    #[test]
    fn duplicate_radius_boundary_is_inclusive() {
        assert!(within_range(10.0, DUPLICATE_RADIUS_M));
        assert!(!within_range(10.000001, DUPLICATE_RADIUS_M));
    }

    #[test]
    fn nearby_points_fall_within_radius() {
        // ~5.5 m north
        let near = Coordinate::new(127.1378, 37.42005);
        // ~22 m north
        let far = Coordinate::new(127.1378, 37.4202);
        assert!(is_within_range(&SEONGNAM_CITY_HALL, &near, DUPLICATE_RADIUS_M));
        assert!(!is_within_range(&SEONGNAM_CITY_HALL, &far, DUPLICATE_RADIUS_M));
    }

    #[test]
    fn out_of_range_coordinate_fails_conversion() {
        assert!(Coordinate::new(127.0, 95.0).to_values().is_err());
        assert!(Coordinate::new(200.0, 37.0).to_values().is_err());
        assert!(Coordinate::new(127.0, 37.0).to_values().is_ok());
    }
}
