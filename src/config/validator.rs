//! Config validation.

use super::baselines::{Baseline, BaselineTable, MetricSource};
use super::profiles::WorkloadProfile;
use super::ScoringConfig;
use crate::error::ConfigError;
use crate::models::PerDomain;
use std::collections::HashSet;

/// Tolerance for the "weights sum to 1.0" convention.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate one baseline range (finite, min < max).
pub fn validate_baseline(label: &str, baseline: &Baseline) -> Result<(), ConfigError> {
    if !baseline.min_value.is_finite() || !baseline.max_value.is_finite() {
        return Err(ConfigError::ValidationFailed(format!(
            "Baseline {} must have finite bounds, got [{}, {}]",
            label, baseline.min_value, baseline.max_value
        )));
    }

    if baseline.min_value >= baseline.max_value {
        return Err(ConfigError::ValidationFailed(format!(
            "Baseline {} must have min < max, got [{}, {}]",
            label, baseline.min_value, baseline.max_value
        )));
    }

    Ok(())
}

/// Validate every baseline in a table.
pub fn validate_baseline_table(table: &BaselineTable) -> Result<(), ConfigError> {
    if table.version.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "Baseline table version cannot be empty".to_string(),
        ));
    }

    for (source, metric, baseline) in table.entries() {
        validate_baseline(&format!("{}.{}", source.label(), metric), baseline)?;
    }

    // Legal (the source then scores 0) but almost always a typo.
    for source in MetricSource::ALL {
        if table.primary(source).is_none() {
            log::warn!(
                "[Config] No baseline for {}.{}, its scores will be 0",
                source.label(),
                source.primary_metric()
            );
        }
    }

    Ok(())
}

/// Validate a weight set (finite, non-negative).
///
/// Weights that do not sum to 1.0 are accepted with a warning.
pub fn validate_weights(label: &str, weights: &PerDomain<f64>) -> Result<(), ConfigError> {
    for (domain, weight) in weights.iter() {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(ConfigError::ValidationFailed(format!(
                "{} weight for {} must be a finite non-negative number, got {}",
                label, domain, weight
            )));
        }
    }

    let sum: f64 = weights.iter().map(|(_, w)| *w).sum();
    if sum <= 0.0 {
        return Err(ConfigError::ValidationFailed(format!(
            "{} weights cannot all be zero",
            label
        )));
    }
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        log::warn!("[Config] {} weights sum to {:.4}, expected 1.0", label, sum);
    }

    Ok(())
}

/// Validate a workload profile.
pub fn validate_profile(profile: &WorkloadProfile) -> Result<(), ConfigError> {
    if profile.name.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "Workload profile name cannot be empty".to_string(),
        ));
    }

    validate_weights(&format!("Profile '{}'", profile.name), &profile.weights)?;

    for (domain, min) in profile.min_scores.iter() {
        if !(0.0..=100.0).contains(min) {
            return Err(ConfigError::ValidationFailed(format!(
                "Profile '{}' minimum {} score must be within 0-100, got {}",
                profile.name, domain, min
            )));
        }
    }

    Ok(())
}

/// Validate a complete scoring configuration.
pub fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    validate_baseline_table(&config.baselines)?;
    validate_weights("Overall", &config.overall_weights)?;

    let mut seen = HashSet::new();
    for profile in &config.profiles {
        validate_profile(profile)?;
        if !seen.insert(profile.name.to_lowercase()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Duplicate workload profile '{}'",
                profile.name
            )));
        }
    }

    Ok(())
}
