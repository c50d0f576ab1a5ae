//! Scoring configuration.
//!
//! Everything that turns raw numbers into scores is data rather than code:
//! the baseline table, the fixed weights of the overall score, and the
//! workload profiles used by the recommender.
//!
//! # Module Structure
//!
//! - `baselines`: Reference ranges per (domain, metric) and the metric-source selector
//! - `profiles`: Built-in workload profiles
//! - `loader`: Reading and writing `.toml` / `.json` configuration files
//! - `validator`: Sanity checks applied to every loaded configuration
//!
//! A config file may set any subset of the top-level tables; the rest fall
//! back to the built-in defaults.

pub mod baselines;
pub mod loader;
pub mod profiles;
pub mod validator;

pub use baselines::{Baseline, BaselineTable, DiskBaselines, MetricSource, BASELINE_TABLE_VERSION};
pub use profiles::{find_profile, get_available_profiles, get_profile, WorkloadProfile};

use crate::error::ConfigError;
use crate::models::PerDomain;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed weights of the overall score.
pub fn default_overall_weights() -> PerDomain<f64> {
    PerDomain::new(0.3, 0.2, 0.3, 0.2)
}

/// Complete scoring configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub baselines: BaselineTable,
    pub overall_weights: PerDomain<f64>,
    pub profiles: Vec<WorkloadProfile>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            baselines: BaselineTable::default(),
            overall_weights: default_overall_weights(),
            profiles: get_available_profiles(),
        }
    }
}

impl ScoringConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = loader::load_config_from_file(path)?;
        validator::validate_scoring_config(&config)?;
        Ok(config)
    }

    /// Load `path` if given, else the default location, else built-ins.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => match loader::get_default_config_path() {
                Some(default_path) if default_path.exists() => Self::load(&default_path),
                _ => {
                    log::debug!("[Config] No config file, using built-in scoring tables");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn profile(&self, name: &str) -> Option<&WorkloadProfile> {
        find_profile(&self.profiles, name)
    }

    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScoringConfig::default();
        assert!(validator::validate_scoring_config(&config).is_ok());
        assert_eq!(config.profiles.len(), 5);
        assert_eq!(config.overall_weights.cpu, 0.3);
    }

    #[test]
    fn test_profile_lookup_uses_configured_list() {
        let mut config = ScoringConfig::default();
        config.profiles.retain(|p| p.name == "database");
        assert!(config.profile("DATABASE").is_some());
        assert!(config.profile("web_server").is_none());
        assert_eq!(config.profile_names(), vec!["database"]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ScoringConfig = toml::from_str(
            r#"
            [overall_weights]
            cpu = 0.5
            memory = 0.5
            disk = 0.0
            network = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.overall_weights.cpu, 0.5);
        assert_eq!(config.baselines, BaselineTable::default());
        assert_eq!(config.profiles, get_available_profiles());
    }
}
