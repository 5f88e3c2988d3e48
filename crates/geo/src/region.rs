//! Operating region bounds.
//!
//! Reference points supplied by users must fall inside the region before any
//! proximity query runs. Candidate coordinates are never checked here.

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// A rectangular latitude/longitude box, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Southern edge in degrees
    pub min_lat: f64,
    /// Northern edge in degrees
    pub max_lat: f64,
    /// Western edge in degrees
    pub min_lon: f64,
    /// Eastern edge in degrees
    pub max_lon: f64,
}

/// Approximate bounding box of Mallorca.
pub const MALLORCA_BOUNDS: GeoBounds = GeoBounds {
    min_lat: 39.2,
    max_lat: 40.0,
    min_lon: 2.2,
    max_lon: 3.5,
};

impl GeoBounds {
    /// Returns true if the coordinate lies inside the box.
    ///
    /// NaN components always fall outside.
    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.min_lat <= coord.latitude
            && coord.latitude <= self.max_lat
            && self.min_lon <= coord.longitude
            && coord.longitude <= self.max_lon
    }

    /// Checks a caller-supplied reference point.
    ///
    /// # Errors
    /// [`GeoError::InvalidCoordinate`] for non-finite values,
    /// [`GeoError::OutOfRegion`] when the point is outside the box.
    pub fn check(&self, coord: &Coordinate) -> Result<()> {
        if !coord.is_finite() {
            return Err(GeoError::InvalidCoordinate(format!(
                "reference point {coord} is not finite"
            )));
        }
        if !self.contains(coord) {
            return Err(GeoError::OutOfRegion {
                latitude: coord.latitude,
                longitude: coord.longitude,
            });
        }
        Ok(())
    }

    /// Geometric center of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

/// Returns true if the coordinate lies within [`MALLORCA_BOUNDS`].
#[inline]
pub fn is_within_region(coord: &Coordinate) -> bool {
    MALLORCA_BOUNDS.contains(coord)
}

/// Degree-based form of [`is_within_region`].
#[inline]
pub fn is_point_in_region(latitude: f64, longitude: f64) -> bool {
    is_within_region(&Coordinate::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_point() {
        assert!(is_point_in_region(39.5, 2.8));
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert!(!is_point_in_region(41.0, 2.8));
        assert!(!is_point_in_region(39.1, 2.8));
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert!(!is_point_in_region(39.5, 5.0));
        assert!(!is_point_in_region(39.5, 2.1));
    }

    #[test]
    fn test_edges_are_inclusive() {
        assert!(is_point_in_region(39.2, 2.2));
        assert!(is_point_in_region(40.0, 3.5));
        assert!(is_point_in_region(39.2, 3.5));
    }

    #[test]
    fn test_nan_is_outside() {
        assert!(!is_point_in_region(f64::NAN, 2.8));
        assert!(!is_point_in_region(39.5, f64::NAN));
    }

    #[test]
    fn test_check_reports_kind() {
        assert!(MALLORCA_BOUNDS.check(&Coordinate::new(39.8353, 3.1190)).is_ok());
        assert!(matches!(
            MALLORCA_BOUNDS.check(&Coordinate::new(41.0, 2.8)),
            Err(GeoError::OutOfRegion { .. })
        ));
        assert!(matches!(
            MALLORCA_BOUNDS.check(&Coordinate::new(f64::NAN, 2.8)),
            Err(GeoError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_center_is_inside() {
        assert!(is_within_region(&MALLORCA_BOUNDS.center()));
    }
}
