//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ProwlerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// `.json` files are JSON; everything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }
}

/// Load and validate configuration from a TOML or JSON file.
pub fn load_config(path: &Path) -> Result<ProwlerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, Format::from_path(path))
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str, format: Format) -> Result<ProwlerConfig, ConfigError> {
    let config: ProwlerConfig = match format {
        Format::Toml => toml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
