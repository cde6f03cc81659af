//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load `path` when given, otherwise fall back to defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ServiceConfig::default()),
    }
}

/// Apply a command-line bind address over `config` and validate the result.
pub fn with_bind_override(
    mut config: ServiceConfig,
    bind: Option<String>,
) -> Result<ServiceConfig, ConfigError> {
    let Some(bind) = bind else {
        return Ok(config);
    };
    config.listener.bind_address = bind;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [storage]
            path = "/tmp/tasks.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.storage.path, "/tmp/tasks.json");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.import.delay_ms, 1000);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config("[timeouts]\nrequest_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeouts.request_secs"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.toml");
        fs::write(&path, "[import]\ndelay_ms = 5\n").unwrap();

        let config = load_or_default(Some(path.as_path())).unwrap();
        assert_eq!(config.import.delay_ms, 5);

        let missing = load_config(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_bind_override_is_validated() {
        let config = with_bind_override(ServiceConfig::default(), Some("127.0.0.1:4100".into()))
            .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:4100");

        let untouched = with_bind_override(ServiceConfig::default(), None).unwrap();
        assert_eq!(untouched.listener.bind_address, "0.0.0.0:3333");

        let err = with_bind_override(ServiceConfig::default(), Some("not-an-address".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("listener.bind_address"));
    }
}
