//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or checking `seokit.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid seokit.toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_path() {
        let err = ConfigError::Io(
            PathBuf::from("seokit.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("seokit.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_toml_error_carries_detail() {
        let parse_err = toml::from_str::<toml::Value>("[site").unwrap_err();
        let err = ConfigError::from(parse_err);
        assert!(err.to_string().starts_with("invalid seokit.toml: "));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation("[site.url] must start with http".into());
        assert_eq!(
            err.to_string(),
            "Config validation error: [site.url] must start with http"
        );
    }
}
