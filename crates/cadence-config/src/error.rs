//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("no configuration file at {0}")]
    NotFound(PathBuf),

    /// The file exists but cannot be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML syntax or field types.
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// A value that parses but cannot be used.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ConfigError::NotFound(PathBuf::from("/path/to/cadence.toml"));
        assert_eq!(
            err.to_string(),
            "no configuration file at /path/to/cadence.toml"
        );
    }

    #[test]
    fn test_read_display() {
        let err = ConfigError::Read {
            path: PathBuf::from("cadence.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read cadence.toml: denied");
    }

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::Invalid("version.key must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: version.key must not be empty"
        );
    }

    #[test]
    fn test_invalid_toml_from() {
        let toml_err = toml::from_str::<toml::Table>("[git").unwrap_err();
        let err = ConfigError::from(toml_err);
        assert!(err.to_string().starts_with("invalid TOML: "));
    }
}
