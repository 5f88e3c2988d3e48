//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
///
/// Distance and proximity computations never fail; errors are only produced
/// when a caller-supplied reference point is checked.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    /// Invalid coordinate values (NaN or infinite)
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Reference point outside the operating region
    #[error("Coordinate ({latitude}, {longitude}) is outside the supported region")]
    OutOfRegion {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },
}

/// Error code for integration with mallorca-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
    /// Reference point outside the region
    OutOfRegion = 10004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::OutOfRegion { .. } => GeoErrorCode::OutOfRegion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = GeoError::OutOfRegion { latitude: 41.0, longitude: 2.8 };
        assert_eq!(err.code(), GeoErrorCode::OutOfRegion);
        assert_eq!(err.code() as u32, 10004);
        assert!(err.to_string().contains("outside the supported region"));
    }
}
