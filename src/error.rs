//! Error type hierarchy for hwbench
//!
//! Benchmark-level failures (a tool that timed out, a metric that never parsed)
//! are data, not errors: they travel as [`crate::models::Outcome::Failure`]
//! payloads through the scoring pipeline. The types here cover the
//! infrastructure around the core: configuration files and results directories.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration file parsing and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid TOML in config: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("Failed to serialize config as TOML: {0}")]
    SerializeToml(#[from] toml::ser::Error),

    #[error("Failed to serialize config as JSON: {0}")]
    SerializeJson(#[source] serde_json::Error),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during config operations: {0}")]
    IoError(#[from] io::Error),
}

/// Results directory read/write errors.
#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("Results file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error in results directory: {0}")]
    Io(#[from] io::Error),
}

impl ResultsError {
    /// Short, user-facing message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ResultsError::MissingFile(path) => {
                format!("No benchmark results at {}", path.display())
            }
            ResultsError::InvalidJson { path, .. } => {
                format!("Results file {} is corrupt or not JSON", path.display())
            }
            ResultsError::Serialize { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            ResultsError::Io(e) => format!("File operation failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::FileNotFound("/etc/hwbench/scoring.toml".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /etc/hwbench/scoring.toml"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::ValidationFailed("cpu baseline min >= max".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration validation failed: cpu baseline min >= max"
        );
    }

    #[test]
    fn test_results_missing_file_message() {
        let err = ResultsError::MissingFile(PathBuf::from("/tmp/run/raw_results.json"));
        assert_eq!(
            err.to_string(),
            "Results file not found: /tmp/run/raw_results.json"
        );
        assert!(err.user_message().contains("/tmp/run/raw_results.json"));
    }

    #[test]
    fn test_serialize_errors_are_not_parse_errors() {
        let source = serde_json::to_string(&std::collections::BTreeMap::from([((1u8, 2u8), 0u8)]))
            .unwrap_err();
        let err = ConfigError::SerializeJson(source);
        assert!(err.to_string().starts_with("Failed to serialize config as JSON"));

        let source = serde_json::to_string(&std::collections::BTreeMap::from([((1u8, 2u8), 0u8)]))
            .unwrap_err();
        let err = ResultsError::Serialize {
            path: PathBuf::from("raw_results.json"),
            source,
        };
        assert!(err.to_string().starts_with("Failed to serialize raw_results.json"));
        assert!(!err.user_message().contains("corrupt"));
    }

    #[test]
    fn test_results_invalid_json_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ResultsError::InvalidJson {
            path: PathBuf::from("normalized_results.json"),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Invalid JSON in normalized_results.json"));
    }
}
