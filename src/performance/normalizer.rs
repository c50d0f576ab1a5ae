//! Normalization of raw benchmark results onto a common 0-100 scale
//!
//! ## Architecture
//! - **Baselines**: Every score is the position of a run-set mean inside a
//!   fixed reference range (see [`crate::config::baselines`]). Values outside
//!   the range are clamped, so a score never leaves 0-100.
//! - **Metric sources**: CPU, memory and network are scored on one metric
//!   each; disk is scored per I/O pattern (IOPS for random patterns,
//!   bandwidth for sequential ones) and averaged over the patterns that ran.
//! - **Failures pass through**: a failed run-set stays a failure in the
//!   normalized output so callers can tell "no score" from "scored 0".
//! - **Missing data scores 0**: an absent metric or baseline ranks last
//!   instead of being excluded from comparison.

use super::overall::overall_score;
use crate::config::baselines::{Baseline, BaselineTable, MetricSource};
use crate::config::{default_overall_weights, ScoringConfig};
use crate::models::{
    DiskRawResults, DiskScore, MetricScore, NormalizedResults, Outcome, PerDomain, RawResults,
    RunSetOutcome,
};

/// Reason reported for a disk domain that ran no I/O pattern.
pub const NO_DISK_PATTERNS: &str = "no disk I/O patterns reported";

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Map a raw value onto 0-100 using a baseline.
///
/// `None` and NaN score 0. Infinite values clamp to the matching bound.
pub fn normalize_value(value: Option<f64>, baseline: &Baseline) -> f64 {
    let value = match value {
        Some(v) if !v.is_nan() => v,
        _ => return 0.0,
    };

    let (min, max) = (baseline.min_value, baseline.max_value);
    let range = max - min;
    // Rejected by config validation; guarded so a hand-built table cannot
    // produce NaN or infinite scores.
    if !(range > 0.0) || !range.is_finite() {
        return 0.0;
    }

    let clamped = value.clamp(min, max);
    let normalized = if baseline.higher_is_better {
        (clamped - min) / range * 100.0
    } else {
        (max - clamped) / range * 100.0
    };

    round2(normalized)
}

/// Normalizer: turns raw run-set aggregates into domain scores.
#[derive(Clone, Debug)]
pub struct Normalizer {
    baselines: BaselineTable,
    overall_weights: PerDomain<f64>,
}

impl Normalizer {
    /// Create a normalizer with the built-in baselines and weights
    pub fn new() -> Self {
        Normalizer {
            baselines: BaselineTable::default(),
            overall_weights: default_overall_weights(),
        }
    }

    /// Create a normalizer with custom tables
    pub fn with_tables(baselines: BaselineTable, overall_weights: PerDomain<f64>) -> Self {
        Normalizer {
            baselines,
            overall_weights,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::with_tables(config.baselines.clone(), config.overall_weights)
    }

    pub fn baselines(&self) -> &BaselineTable {
        &self.baselines
    }

    /// Normalize every domain present in `raw` and compute the overall score.
    ///
    /// Domains absent from `raw` stay absent.
    pub fn normalize(&self, raw: &RawResults) -> NormalizedResults {
        let mut normalized = NormalizedResults {
            cpu: raw.cpu.as_ref().map(|r| self.score_source(MetricSource::Cpu, r)),
            memory: raw
                .memory
                .as_ref()
                .map(|r| self.score_source(MetricSource::Memory, r)),
            disk: raw.disk.as_ref().map(|r| self.normalize_disk(r)),
            network: raw
                .network
                .as_ref()
                .map(|r| self.score_source(MetricSource::Network, r)),
            overall_score: 0.0,
        };
        normalized.overall_score = overall_score(&normalized, &self.overall_weights);

        log::debug!(
            "[Normalizer] Normalized {} domain(s), overall score {:.2}",
            raw.domains().len(),
            normalized.overall_score
        );
        normalized
    }

    /// Score one run-set against its source's primary metric.
    pub fn score_source(&self, source: MetricSource, run_set: &RunSetOutcome) -> Outcome<MetricScore> {
        let summary = match run_set {
            Outcome::Success(summary) => summary,
            Outcome::Failure(reason) => return Outcome::Failure(reason.clone()),
        };

        let metric = source.primary_metric();
        let stats = summary.statistic(metric);
        let raw_value = stats.map(|s| s.mean);

        let score = match self.baselines.primary(source) {
            Some(baseline) => normalize_value(raw_value, baseline),
            None => {
                log::warn!(
                    "[Normalizer] No baseline for {}.{}, scoring 0",
                    source.label(),
                    metric
                );
                0.0
            }
        };
        if raw_value.is_none() {
            log::debug!(
                "[Normalizer] {} has no '{}' statistic, scoring 0",
                source.label(),
                metric
            );
        }

        Outcome::Success(MetricScore {
            score,
            raw_value: raw_value.unwrap_or(0.0),
            metric_name: metric.to_string(),
            variance_percent: stats.map(|s| s.variance_percent).unwrap_or(0.0),
        })
    }

    /// Score each disk pattern and average the successful ones.
    ///
    /// With no successful pattern the whole domain fails, carrying the first
    /// pattern error.
    pub fn normalize_disk(&self, disk: &Outcome<DiskRawResults>) -> Outcome<DiskScore> {
        let patterns = match disk {
            Outcome::Success(patterns) => patterns,
            Outcome::Failure(reason) => return Outcome::Failure(reason.clone()),
        };

        let scored: Vec<_> = patterns
            .iter()
            .map(|(pattern, run_set)| {
                (
                    *pattern,
                    self.score_source(MetricSource::DiskPattern(*pattern), run_set),
                )
            })
            .collect();

        let scores: Vec<f64> = scored
            .iter()
            .filter_map(|(_, outcome)| outcome.success().map(|s| s.score))
            .collect();

        if scores.is_empty() {
            let reason = scored
                .iter()
                .find_map(|(_, outcome)| outcome.error())
                .unwrap_or(NO_DISK_PATTERNS)
                .to_string();
            return Outcome::Failure(reason);
        }

        let average_score = round2(scores.iter().sum::<f64>() / scores.len() as f64);
        Outcome::Success(DiskScore {
            patterns: scored.into_iter().collect(),
            average_score,
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
