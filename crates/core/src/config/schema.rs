//! Configuration schema definitions

use crate::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Data source settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Defaults for nearby queries
    #[serde(default)]
    pub nearby: NearbyConfig,

    /// Defaults for plain listings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> ValidationResult {
        let mut validator = Validator::new()
            .custom("nearby.default_radius_km", || {
                let radius = self.nearby.default_radius_km;
                (!(radius.is_finite() && radius > 0.0))
                    .then(|| format!("Must be a positive number of kilometers, got {}", radius))
            })
            .range("nearby.default_max_results", self.nearby.default_max_results, 1, 1000)
            .range("listing.default_limit", self.listing.default_limit, 1, self.listing.max_limit)
            .one_of(
                "logging.level",
                &self.logging.level,
                &["trace", "debug", "info", "warn", "error"],
            );

        if let Some(path) = &self.general.data_file {
            validator = validator.required("general.data_file", path);
        }

        validator.validate()
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    /// Catalog snapshot file; the built-in seed data is used when unset
    #[serde(default)]
    pub data_file: Option<String>,
}

/// Nearby query defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyConfig {
    /// Radius used when the caller gives none
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    /// Result count used when the caller gives none
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            default_max_results: default_max_results(),
        }
    }
}

fn default_radius_km() -> f64 {
    5.0
}

fn default_max_results() -> usize {
    10
}

/// Listing pagination defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Page size used when the caller gives none
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest page size accepted
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize {
    100
}

fn default_max_limit() -> usize {
    1000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,

    /// Include the event target in log lines
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            show_target: false,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        assert_eq!(schema.nearby.default_radius_km, 5.0);
        assert_eq!(schema.nearby.default_max_results, 10);
        assert_eq!(schema.listing.default_limit, 100);
        assert!(schema.validate().is_valid());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [nearby]
            default_radius_km = 12.5
            "#,
        )
        .unwrap();
        assert_eq!(schema.nearby.default_radius_km, 12.5);
        assert_eq!(schema.nearby.default_max_results, 10);
        assert_eq!(schema.logging.level, "warn");
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut schema = ConfigSchema::default();
        schema.nearby.default_radius_km = -1.0;
        schema.logging.level = "loud".to_string();
        let result = schema.validate();
        assert_eq!(result.errors().len(), 2);
    }
}
