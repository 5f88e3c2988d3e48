//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. The region served is about
//! 100 km across, so the spherical model stays well under one percent off an
//! ellipsoidal one.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance in kilometers between two coordinates, rounded to 2 decimals.
///
/// This is the distance reported to callers and used for radius filtering.
/// Rounding happens once, here; never feed the result back into another
/// distance computation.
///
/// # Example
/// ```
/// use mallorca_geo::{distance_km, Coordinate};
///
/// let alcudia = Coordinate::new(39.8353, 3.1190);
/// let mesquida = Coordinate::new(39.7444, 3.4361);
///
/// assert_eq!(distance_km(&alcudia, &mesquida), 28.92);
/// assert_eq!(distance_km(&alcudia, &alcudia), 0.0);
/// ```
#[inline]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    round_km(haversine_distance(from, to))
}

/// Degree-based form of [`distance_km`].
///
/// # Arguments
/// * `lat1` - Latitude of first point
/// * `lon1` - Longitude of first point
/// * `lat2` - Latitude of second point
/// * `lon2` - Longitude of second point
#[inline]
pub fn distance_km_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_km(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2))
}

/// Rounds a kilometer value to 2 decimal places.
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Calculates the unrounded great-circle distance between two coordinates in kilometers.
///
/// # Arguments
/// * `from` - Starting coordinate
/// * `to` - Ending coordinate
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Antipodal inputs can push `a` a hair past 1.0.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

/// Fast approximate distance (equirectangular projection), in kilometers.
///
/// Accurate enough inside the region for diagnostics; not used for ranking.
#[inline]
pub fn approximate_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let x = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
    let y = lat2 - lat1;

    (x * x + y * y).sqrt() * EARTH_RADIUS_KM
}
