//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GovernanceConfig;
use crate::config::validation::validate_config;
use crate::validation::ValidationErrors;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GovernanceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GovernanceConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_round_trip() {
        let path = std::env::temp_dir().join("gatehouse_loader_test.toml");
        fs::write(
            &path,
            "[admission]\nrequests_per_second = 4.0\nburst_size = 8\n\n[store]\noperation_timeout_secs = 5\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.admission.requests_per_second, 4.0);
        assert_eq!(config.admission.burst_size, 8);
        assert_eq!(config.store.operation_timeout_secs, 5);

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_invalid_values_surface_as_validation_error() {
        let path = std::env::temp_dir().join("gatehouse_loader_invalid.toml");
        fs::write(&path, "[admission]\nburst_size = 0\n").unwrap();

        match load_config(&path) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.get("admission.burst_size").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        fs::remove_file(&path).unwrap_or_default();
    }
}
