//! Config file loader and serialization.

use super::ScoringConfig;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// Supported on-disk formats, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Default config location: `<config_dir>/hwbench/scoring.toml`
pub fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hwbench").join("scoring.toml"))
}

/// Validate config path (`.toml` or `.json` extension required).
pub fn validate_config_path(path: &Path) -> Result<ConfigFormat, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "Configuration path cannot be empty".to_string(),
        ));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(ConfigFormat::Toml),
        Some("json") => Ok(ConfigFormat::Json),
        Some(ext) => Err(ConfigError::UnsupportedFormat(format!(
            "expected .toml or .json, got .{}",
            ext
        ))),
        None => Err(ConfigError::UnsupportedFormat(
            "configuration file needs a .toml or .json extension".to_string(),
        )),
    }
}

/// Parse config text in the given format.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ScoringConfig, ConfigError> {
    let config = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };
    Ok(config)
}

/// Load config from a `.toml` or `.json` file (not validated).
pub fn load_config_from_file(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let format = validate_config_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(path.display().to_string())
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let config = parse_config(&content, format)?;
    log::info!(
        "[Config] Loaded scoring config from {} (baseline table v{}, {} profiles)",
        path.display(),
        config.baselines.version,
        config.profiles.len()
    );
    Ok(config)
}

/// Save config, format chosen by extension.
pub fn save_config_to_file(config: &ScoringConfig, path: &Path) -> Result<(), ConfigError> {
    let format = validate_config_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).map_err(ConfigError::SerializeJson)?
        }
    };
    fs::write(path, content)?;

    Ok(())
}
