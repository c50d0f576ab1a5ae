//! Reference baselines used to scale raw metrics onto 0-100.
//!
//! Scores are only comparable across independent benchmark runs because this
//! table is fixed. Recalibrating it means bumping [`BASELINE_TABLE_VERSION`].

use crate::models::{Domain, IoPattern};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the built-in baseline table.
pub const BASELINE_TABLE_VERSION: &str = "1";

/// Reference range for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    #[serde(rename = "min", alias = "min_value")]
    pub min_value: f64,
    #[serde(rename = "max", alias = "max_value")]
    pub max_value: f64,
    #[serde(alias = "higher_better", default = "default_higher_is_better")]
    pub higher_is_better: bool,
}

fn default_higher_is_better() -> bool {
    true
}

impl Baseline {
    pub fn higher_is_better(min_value: f64, max_value: f64) -> Self {
        Baseline {
            min_value,
            max_value,
            higher_is_better: true,
        }
    }

    pub fn lower_is_better(min_value: f64, max_value: f64) -> Self {
        Baseline {
            min_value,
            max_value,
            higher_is_better: false,
        }
    }
}

/// Baselines of one scope, keyed by metric name.
pub type MetricBaselines = BTreeMap<String, Baseline>;

/// Where a score comes from: a scalar domain or one disk I/O pattern.
///
/// The normalization formula is the same for every source; only the
/// baseline scope and the metric that drives the score differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricSource {
    Cpu,
    Memory,
    Network,
    DiskPattern(IoPattern),
}

impl MetricSource {
    pub const ALL: [MetricSource; 7] = [
        MetricSource::Cpu,
        MetricSource::Memory,
        MetricSource::Network,
        MetricSource::DiskPattern(IoPattern::RandRead),
        MetricSource::DiskPattern(IoPattern::RandWrite),
        MetricSource::DiskPattern(IoPattern::Read),
        MetricSource::DiskPattern(IoPattern::Write),
    ];

    /// Metric whose run-set mean is normalized.
    pub fn primary_metric(&self) -> &'static str {
        match self {
            MetricSource::Cpu => "events_per_second",
            MetricSource::Memory => "transfer_rate_mib_sec",
            MetricSource::Network => "bandwidth_mbps",
            MetricSource::DiskPattern(p) if p.is_random() => "iops",
            MetricSource::DiskPattern(_) => "bandwidth_kb",
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            MetricSource::Cpu => Domain::Cpu,
            MetricSource::Memory => Domain::Memory,
            MetricSource::Network => Domain::Network,
            MetricSource::DiskPattern(_) => Domain::Disk,
        }
    }

    /// `cpu`, `disk.randread`, ...
    pub fn label(&self) -> String {
        match self {
            MetricSource::DiskPattern(p) => format!("disk.{}", p),
            other => other.domain().to_string(),
        }
    }
}

/// Disk baselines, one scope per I/O pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskBaselines {
    pub randread: MetricBaselines,
    pub randwrite: MetricBaselines,
    pub read: MetricBaselines,
    pub write: MetricBaselines,
}

impl DiskBaselines {
    pub fn pattern(&self, pattern: IoPattern) -> &MetricBaselines {
        match pattern {
            IoPattern::RandRead => &self.randread,
            IoPattern::RandWrite => &self.randwrite,
            IoPattern::Read => &self.read,
            IoPattern::Write => &self.write,
        }
    }

    pub fn pattern_mut(&mut self, pattern: IoPattern) -> &mut MetricBaselines {
        match pattern {
            IoPattern::RandRead => &mut self.randread,
            IoPattern::RandWrite => &mut self.randwrite,
            IoPattern::Read => &mut self.read,
            IoPattern::Write => &mut self.write,
        }
    }
}

/// The full baseline table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineTable {
    pub version: String,
    pub cpu: MetricBaselines,
    pub memory: MetricBaselines,
    pub disk: DiskBaselines,
    pub network: MetricBaselines,
}

impl BaselineTable {
    /// Baseline for a metric of a source, if configured.
    pub fn get(&self, source: MetricSource, metric: &str) -> Option<&Baseline> {
        let scope = match source {
            MetricSource::Cpu => &self.cpu,
            MetricSource::Memory => &self.memory,
            MetricSource::Network => &self.network,
            MetricSource::DiskPattern(pattern) => self.disk.pattern(pattern),
        };
        scope.get(metric)
    }

    /// Baseline for the metric that drives a source's score.
    pub fn primary(&self, source: MetricSource) -> Option<&Baseline> {
        self.get(source, source.primary_metric())
    }

    /// Insert or replace a baseline.
    pub fn set(&mut self, source: MetricSource, metric: impl Into<String>, baseline: Baseline) {
        let scope = match source {
            MetricSource::Cpu => &mut self.cpu,
            MetricSource::Memory => &mut self.memory,
            MetricSource::Network => &mut self.network,
            MetricSource::DiskPattern(pattern) => self.disk.pattern_mut(pattern),
        };
        scope.insert(metric.into(), baseline);
    }

    /// Every configured (source, metric, baseline) triple.
    pub fn entries(&self) -> Vec<(MetricSource, &str, &Baseline)> {
        let mut out = Vec::new();
        for (source, scope) in [
            (MetricSource::Cpu, &self.cpu),
            (MetricSource::Memory, &self.memory),
            (MetricSource::Network, &self.network),
        ] {
            out.extend(scope.iter().map(|(m, b)| (source, m.as_str(), b)));
        }
        for pattern in IoPattern::ALL {
            let source = MetricSource::DiskPattern(pattern);
            let scope = self.disk.pattern(pattern);
            out.extend(scope.iter().map(|(m, b)| (source, m.as_str(), b)));
        }
        out
    }

    fn empty(version: &str) -> Self {
        BaselineTable {
            version: version.to_string(),
            cpu: MetricBaselines::new(),
            memory: MetricBaselines::new(),
            disk: DiskBaselines::default(),
            network: MetricBaselines::new(),
        }
    }
}

impl Default for BaselineTable {
    fn default() -> Self {
        let mut table = BaselineTable::empty(BASELINE_TABLE_VERSION);
        table.set(
            MetricSource::Cpu,
            "events_per_second",
            Baseline::higher_is_better(100.0, 10_000.0),
        );
        table.set(
            MetricSource::Memory,
            "transfer_rate_mib_sec",
            Baseline::higher_is_better(1_000.0, 50_000.0),
        );
        for pattern in IoPattern::ALL {
            let source = MetricSource::DiskPattern(pattern);
            let baseline = if pattern.is_random() {
                Baseline::higher_is_better(100.0, 100_000.0) // IOPS
            } else {
                Baseline::higher_is_better(10_000.0, 5_000_000.0) // KB/s
            };
            table.set(source, source.primary_metric(), baseline);
        }
        table.set(
            MetricSource::Network,
            "bandwidth_mbps",
            Baseline::higher_is_better(10.0, 10_000.0),
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_every_source() {
        let table = BaselineTable::default();
        for source in MetricSource::ALL {
            assert!(
                table.primary(source).is_some(),
                "missing baseline for {}",
                source.label()
            );
        }
    }

    #[test]
    fn test_disk_metric_selection() {
        assert_eq!(MetricSource::DiskPattern(IoPattern::RandRead).primary_metric(), "iops");
        assert_eq!(MetricSource::DiskPattern(IoPattern::Write).primary_metric(), "bandwidth_kb");

        let table = BaselineTable::default();
        let seq = table.primary(MetricSource::DiskPattern(IoPattern::Read)).unwrap();
        assert_eq!(seq.min_value, 10_000.0);
        assert_eq!(seq.max_value, 5_000_000.0);
    }

    #[test]
    fn test_unknown_metric_has_no_baseline() {
        let table = BaselineTable::default();
        assert!(table.get(MetricSource::Cpu, "latency_avg_ms").is_none());
    }

    #[test]
    fn test_baseline_accepts_legacy_keys() {
        let baseline: Baseline =
            serde_json::from_str(r#"{"min": 10, "max": 20, "higher_better": false}"#).unwrap();
        assert_eq!(baseline, Baseline::lower_is_better(10.0, 20.0));
    }

    #[test]
    fn test_entries_lists_every_baseline() {
        assert_eq!(BaselineTable::default().entries().len(), 7);
    }
}
