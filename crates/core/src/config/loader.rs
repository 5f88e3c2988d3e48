//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path, a standard location, or defaults.
    ///
    /// An explicitly given path must exist; discovered files are optional.
    ///
    /// # Errors
    /// Fails when the file cannot be read or parsed, or a value is out of range.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let validation = schema.validate();
        if !validation.is_valid() {
            let messages: Vec<String> =
                validation.errors().iter().map(ToString::to_string).collect();
            return Err(Error::new(
                ErrorCode::InvalidConfigValue,
                format!("Invalid configuration: {}", messages.join("; ")),
            ));
        }

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = [
        ".mallorca-guide.toml",
        "mallorca-guide.toml",
        ".config/mallorca-guide.toml",
    ]
    .into_iter()
    .map(PathBuf::from);

    let user = dirs::config_dir().map(|dir| dir.join("mallorca-guide").join("config.toml"));

    local.chain(user).find(|candidate| candidate.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
            .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.schema.nearby.default_max_results, 10);
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/mallorca-guide.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listing]\ndefault_limit = 25\n\n[logging]\nlevel = \"debug\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.listing.default_limit, 25);
        assert_eq!(config.schema.logging.level, "debug");
        assert_eq!(config.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[nearby]\ndefault_max_results = 0").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[nearby\nbroken").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }
}
