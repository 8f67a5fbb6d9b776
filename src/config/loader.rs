//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ApiConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ADMIN_NAME_ENV: &str = "ADMIN_NAME";
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
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

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate.
pub fn load_config(path: Option<&Path>) -> Result<ApiConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ApiConfig::default(),
    };
    finish(config, |key| std::env::var(key).ok())
}

/// Parse TOML without touching the environment or validating.
pub fn parse_config(content: &str) -> Result<ApiConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply overrides from `lookup`, then validate.
pub fn finish(
    mut config: ApiConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ApiConfig, ConfigError> {
    if let Some(name) = lookup(ADMIN_NAME_ENV) {
        config.admin.username = name;
    }
    if let Some(password) = lookup(ADMIN_PASSWORD_ENV) {
        config.admin.password = password;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
