//! Run-set aggregation
//!
//! Collapses the repeated runs of one benchmark configuration into
//! per-metric statistics. A single failed run invalidates the whole run-set:
//! the first failure is returned in place of statistics.

use crate::models::{Domain, MetricStatistics, Outcome, RunRecord, RunSetOutcome, RunSetSummary};
use std::collections::BTreeMap;

/// Reason reported for a run-set with no runs at all.
pub const EMPTY_RUN_SET: &str = "no benchmark runs recorded";

/// Aggregate a run-set over the given metric names.
///
/// Each metric is summarized over the runs that carry it; a metric missing
/// from some runs is not an error. Metrics carried by no run are omitted.
pub fn aggregate(records: &[RunRecord], metrics: &[&str]) -> RunSetOutcome {
    if records.is_empty() {
        return Outcome::failure(EMPTY_RUN_SET);
    }

    let mut runs = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match record {
            Outcome::Success(metrics) => runs.push(metrics.clone()),
            Outcome::Failure(reason) => {
                log::debug!(
                    "[Aggregator] Run {}/{} failed, discarding run-set: {}",
                    index + 1,
                    records.len(),
                    reason
                );
                return Outcome::Failure(reason.clone());
            }
        }
    }

    let mut statistics = BTreeMap::new();
    for metric in metrics {
        let values: Vec<f64> = runs.iter().filter_map(|run| run.get(metric)).collect();
        if let Some(stats) = summarize(&values) {
            statistics.insert((*metric).to_string(), stats);
        }
    }

    Outcome::Success(RunSetSummary { runs, statistics })
}

/// Aggregate a run-set using the domain's own metric list.
pub fn aggregate_domain(domain: Domain, records: &[RunRecord]) -> RunSetOutcome {
    aggregate(records, domain.summary_metrics())
}

/// Statistics of one series, `None` when it has no finite sample.
///
/// Non-finite samples are skipped. Every statistic is finite: sums that would
/// overflow are taken over pre-scaled values, and a spread larger than
/// `f64::MAX` saturates there.
pub fn summarize(values: &[f64]) -> Option<MetricStatistics> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    if sorted.len() < values.len() {
        log::debug!(
            "[Aggregator] Skipped {} non-finite sample(s)",
            values.len() - sorted.len()
        );
    }

    let n = sorted.len();
    let mean = finite_mean(&sorted);

    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        midpoint(sorted[n / 2 - 1], sorted[n / 2])
    };

    let stdev = if n > 1 { sample_stdev(&sorted, mean) } else { 0.0 };

    let variance_percent = if n > 1 && mean > 0.0 {
        (stdev / mean * 100.0).min(f64::MAX)
    } else {
        0.0
    };

    Some(MetricStatistics {
        mean,
        median,
        stdev,
        min: sorted[0],
        max: sorted[n - 1],
        variance_percent,
    })
}

fn finite_mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = (lo + hi) / 2.0;
    if mid.is_finite() {
        mid
    } else {
        lo / 2.0 + hi / 2.0
    }
}

/// Sample (n-1) standard deviation of at least two finite values.
fn sample_stdev(values: &[f64], mean: f64) -> f64 {
    let denom = (values.len() - 1) as f64;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let direct = (sum_sq / denom).sqrt();
    if direct.is_finite() {
        return direct;
    }

    let scale = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let scaled_sq: f64 = values
        .iter()
        .map(|v| (v / scale - mean / scale).powi(2))
        .sum();
    (scale * (scaled_sq / denom).sqrt()).min(f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunMetrics;

    fn run(eps: f64) -> RunRecord {
        Outcome::Success(RunMetrics::new().with("events_per_second", eps))
    }

    #[test]
    fn test_summarize_three_samples() {
        let stats = summarize(&[100.0, 200.0, 300.0]).unwrap();
        assert_eq!(stats.mean, 200.0);
        assert_eq!(stats.median, 200.0);
        assert_eq!(stats.min, 100.0);
        assert_eq!(stats.max, 300.0);
        assert!((stats.stdev - 100.0).abs() < 1e-9);
        assert!((stats.variance_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_even_count_median() {
        let stats = summarize(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_single_sample_has_zero_spread() {
        let stats = summarize(&[42.0]).unwrap();
        assert_eq!(stats.stdev, 0.0);
        assert_eq!(stats.variance_percent, 0.0);
        assert_eq!(stats.median, 42.0);
    }

    #[test]
    fn test_zero_mean_has_zero_variance_percent() {
        let stats = summarize(&[-1.0, 1.0]).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert!(stats.stdev > 0.0);
        assert_eq!(stats.variance_percent, 0.0);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_none());
        assert!(summarize(&[f64::NAN, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let stats = summarize(&[1.5e308, 1.5e308]).unwrap();
        assert_eq!(stats.mean, 1.5e308);
        assert_eq!(stats.median, 1.5e308);
        assert_eq!(stats.stdev, 0.0);
        assert_eq!(stats.variance_percent, 0.0);
    }

    #[test]
    fn test_huge_spread_saturates() {
        let stats = summarize(&[-1.5e308, 1.5e308]).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.median, 0.0);
        assert_eq!(stats.stdev, f64::MAX);
        assert_eq!(stats.variance_percent, 0.0);

        let stats = summarize(&[1.0, 1.7e308, 1.7e308]).unwrap();
        for value in [stats.mean, stats.median, stats.stdev, stats.variance_percent] {
            assert!(value.is_finite(), "{:?}", stats);
        }
    }

    #[test]
    fn test_non_finite_samples_skipped() {
        let stats = summarize(&[10.0, f64::NAN, 20.0, f64::INFINITY]).unwrap();
        assert_eq!(stats.mean, 15.0);
        assert_eq!(stats.max, 20.0);
    }

    #[test]
    fn test_first_failure_aborts_run_set() {
        let records = vec![
            run(5000.0),
            Outcome::failure("Benchmark timed out"),
            Outcome::failure("sysbench not found"),
        ];
        let outcome = aggregate_domain(Domain::Cpu, &records);
        assert_eq!(outcome.error(), Some("Benchmark timed out"));
    }

    #[test]
    fn test_partial_metric_coverage() {
        let records = vec![
            Outcome::Success(
                RunMetrics::new()
                    .with("events_per_second", 5000.0)
                    .with("latency_avg_ms", 0.8),
            ),
            run(6000.0),
        ];
        let outcome = aggregate_domain(Domain::Cpu, &records);
        let summary = outcome.success().unwrap();
        assert_eq!(summary.runs.len(), 2);
        assert_eq!(summary.statistic("events_per_second").unwrap().mean, 5500.0);
        let latency = summary.statistic("latency_avg_ms").unwrap();
        assert_eq!(latency.mean, 0.8);
        assert_eq!(latency.stdev, 0.0);
        assert!(summary.statistic("latency_95p_ms").is_none());
    }

    #[test]
    fn test_unlisted_metrics_not_summarized() {
        let records = vec![Outcome::Success(RunMetrics::new().with("total_events", 1e6))];
        let summary = aggregate_domain(Domain::Cpu, &records);
        assert!(summary.success().unwrap().statistics.is_empty());
    }

    #[test]
    fn test_empty_run_set_is_failure() {
        assert_eq!(aggregate_domain(Domain::Disk, &[]).error(), Some(EMPTY_RUN_SET));
    }
}
