//! Geospatial core for the Mallorca guide.
//!
//! This crate provides:
//! - Region bounds checking for user-supplied reference points
//! - Haversine distance calculations rounded to 2 decimals
//! - Proximity ranking (radius filter, stable distance ordering, pagination)
//!   over any [`Locatable`] candidate
//!
//! # Example
//!
//! ```
//! use mallorca_geo::{distance_km, is_within_region, Coordinate};
//!
//! let alcudia = Coordinate::new(39.8353, 3.1190);
//! let palma = Coordinate::new(39.5198, 2.7458);
//!
//! assert!(is_within_region(&alcudia));
//! assert_eq!(distance_km(&alcudia, &palma), 47.44);
//! ```

mod error;
mod haversine;
pub mod proximity;
pub mod region;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{
    approximate_distance, distance_km, distance_km_between, haversine_distance,
    haversine_distance_meters, round_km, EARTH_RADIUS_KM, EARTH_RADIUS_M,
};
pub use proximity::{
    count_within_radius, find_nearby, find_nearby_owned, Locatable, ProximityQuery, RankedResult,
};
pub use region::{is_point_in_region, is_within_region, GeoBounds, MALLORCA_BOUNDS};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without checking the values.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting NaN and infinite components.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidCoordinate`] if either component is not finite.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_finite() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "latitude {latitude} / longitude {longitude} must be finite"
            )))
        }
    }

    /// Returns true if both components are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Returns true if the coordinate lies within the valid degree ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }

    /// Builds a coordinate from an optional latitude/longitude pair as stored
    /// on a point of interest. Returns `None` unless both are present and finite.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::try_new(lat, lon).ok(),
            _ => None,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(39.5198, 2.7458);
        assert_eq!(coord.latitude, 39.5198);
        assert_eq!(coord.longitude, 2.7458);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
    }

    #[test]
    fn test_try_new_rejects_nan() {
        assert!(Coordinate::try_new(f64::NAN, 2.8).is_err());
        assert!(Coordinate::try_new(39.5, f64::INFINITY).is_err());
        assert!(Coordinate::try_new(39.5, 2.8).is_ok());
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(
            Coordinate::from_parts(Some(39.5), Some(2.8)),
            Some(Coordinate::new(39.5, 2.8))
        );
        assert_eq!(Coordinate::from_parts(Some(39.5), None), None);
        assert_eq!(Coordinate::from_parts(None, Some(2.8)), None);
        assert_eq!(Coordinate::from_parts(Some(f64::NAN), Some(2.8)), None);
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (39.8353, 3.1190).into();
        assert_eq!(coord.latitude, 39.8353);
    }
}
