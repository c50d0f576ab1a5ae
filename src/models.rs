//! Core data types for hwbench.
//!
//! The wire shapes here are the ones stored in a system's results directory
//! (`raw_results.json`, `normalized_results.json`), so every serde attribute
//! in this file is part of the on-disk format.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One benchmarked resource category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl Domain {
    /// All domains in report order.
    pub const ALL: [Domain; 4] = [Domain::Cpu, Domain::Memory, Domain::Disk, Domain::Network];

    /// Wire name (`cpu`, `memory`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Cpu => "cpu",
            Domain::Memory => "memory",
            Domain::Disk => "disk",
            Domain::Network => "network",
        }
    }

    /// Human-readable name for reports
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Cpu => "CPU",
            Domain::Memory => "Memory",
            Domain::Disk => "Disk",
            Domain::Network => "Network",
        }
    }

    /// Metrics summarized when a run-set of this domain is aggregated.
    ///
    /// Disk shares one list across all four I/O patterns.
    pub fn summary_metrics(&self) -> &'static [&'static str] {
        match self {
            Domain::Cpu => &["events_per_second", "latency_avg_ms", "latency_95p_ms"],
            Domain::Memory => &[
                "transfer_rate_mib_sec",
                "operations_per_second",
                "latency_avg_ms",
            ],
            Domain::Disk => &["iops", "bandwidth_kb", "latency_mean_us"],
            Domain::Network => &["bandwidth_mbps", "bandwidth_received_mbps", "retransmits"],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Domain::Cpu),
            "memory" | "mem" => Ok(Domain::Memory),
            "disk" => Ok(Domain::Disk),
            "network" | "net" => Ok(Domain::Network),
            other => Err(format!(
                "unknown domain '{}', expected one of: cpu, memory, disk, network",
                other
            )),
        }
    }
}

/// Disk access mode exercised by one disk run-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoPattern {
    RandRead,
    RandWrite,
    Read,
    Write,
}

impl IoPattern {
    /// All patterns in test order.
    pub const ALL: [IoPattern; 4] = [
        IoPattern::RandRead,
        IoPattern::RandWrite,
        IoPattern::Read,
        IoPattern::Write,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IoPattern::RandRead => "randread",
            IoPattern::RandWrite => "randwrite",
            IoPattern::Read => "read",
            IoPattern::Write => "write",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IoPattern::RandRead => "Random Read",
            IoPattern::RandWrite => "Random Write",
            IoPattern::Read => "Sequential Read",
            IoPattern::Write => "Sequential Write",
        }
    }

    /// Random patterns are scored on IOPS, sequential ones on bandwidth.
    pub fn is_random(&self) -> bool {
        matches!(self, IoPattern::RandRead | IoPattern::RandWrite)
    }
}

impl fmt::Display for IoPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IoPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IoPattern::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                format!(
                    "unknown I/O pattern '{}', expected one of: randread, randwrite, read, write",
                    s
                )
            })
    }
}

/// Either a payload or the reason it could not be produced.
///
/// Serialized as the payload itself on success and as `{"error": "..."}` on
/// failure. A document carrying an `error` string is always read back as a
/// failure, whatever else it contains.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn failure(reason: impl Into<String>) -> Self {
        Outcome::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(reason) => Some(reason),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Success(value) => value.serialize(serializer),
            Outcome::Failure(reason) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", reason)?;
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OutcomeRepr<T> {
    Failure { error: String },
    Success(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Outcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match OutcomeRepr::deserialize(deserializer)? {
            OutcomeRepr::Failure { error } => Outcome::Failure(error),
            OutcomeRepr::Success(value) => Outcome::Success(value),
        })
    }
}

/// Numeric metrics parsed from one benchmark run.
///
/// Non-numeric fields in a stored run (fio's `test_type`, for instance) are
/// dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RunMetrics(BTreeMap<String, f64>);

impl RunMetrics {
    pub fn new() -> Self {
        RunMetrics(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.0.insert(metric.into(), value);
        self
    }

    pub fn insert(&mut self, metric: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(metric.into(), value)
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RunMetrics {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        RunMetrics(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'de> Deserialize<'de> for RunMetrics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(metric, value)| value.as_f64().map(|v| (metric, v)))
            .collect())
    }
}

/// Result of one benchmark invocation.
pub type RunRecord = Outcome<RunMetrics>;

/// Summary statistics for one metric across a run-set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStatistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation, 0 for fewer than two samples
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
    /// Coefficient of variation in percent
    pub variance_percent: f64,
}

/// Aggregated run-set: the individual runs plus per-metric statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSetSummary {
    #[serde(default)]
    pub runs: Vec<RunMetrics>,
    #[serde(default)]
    pub statistics: BTreeMap<String, MetricStatistics>,
}

impl RunSetSummary {
    pub fn statistic(&self, metric: &str) -> Option<&MetricStatistics> {
        self.statistics.get(metric)
    }
}

/// Aggregate of one run-set, or the first run failure that aborted it.
pub type RunSetOutcome = Outcome<RunSetSummary>;

/// Disk run-sets keyed by I/O pattern.
pub type DiskRawResults = BTreeMap<IoPattern, RunSetOutcome>;

/// Contents of `raw_results.json`. Disabled domains are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<RunSetOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<RunSetOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<Outcome<DiskRawResults>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<RunSetOutcome>,
}

impl RawResults {
    /// Domains that were run (successfully or not).
    pub fn domains(&self) -> Vec<Domain> {
        Domain::ALL
            .iter()
            .copied()
            .filter(|d| match d {
                Domain::Cpu => self.cpu.is_some(),
                Domain::Memory => self.memory.is_some(),
                Domain::Disk => self.disk.is_some(),
                Domain::Network => self.network.is_some(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.domains().is_empty()
    }
}

/// Normalized score of a single metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// 0-100
    pub score: f64,
    /// Mean of the metric the score was derived from
    pub raw_value: f64,
    #[serde(alias = "metric")]
    pub metric_name: String,
    #[serde(alias = "variance", default)]
    pub variance_percent: f64,
}

/// Per-pattern disk scores plus their average.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskScore {
    #[serde(flatten)]
    pub patterns: BTreeMap<IoPattern, Outcome<MetricScore>>,
    /// Mean of the successful patterns only
    #[serde(default)]
    pub average_score: f64,
}

/// Contents of `normalized_results.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Outcome<MetricScore>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Outcome<MetricScore>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<Outcome<DiskScore>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Outcome<MetricScore>>,
    #[serde(default)]
    pub overall_score: f64,
}

impl NormalizedResults {
    /// Score of a domain that is present and error-free.
    ///
    /// Disk reports its `average_score`.
    pub fn domain_score(&self, domain: Domain) -> Option<f64> {
        match domain {
            Domain::Disk => self
                .disk
                .as_ref()
                .and_then(Outcome::success)
                .map(|d| d.average_score),
            _ => self.metric_score(domain).map(|m| m.score),
        }
    }

    /// Scalar score record for cpu, memory or network.
    pub fn metric_score(&self, domain: Domain) -> Option<&MetricScore> {
        let slot = match domain {
            Domain::Cpu => &self.cpu,
            Domain::Memory => &self.memory,
            Domain::Network => &self.network,
            Domain::Disk => return None,
        };
        slot.as_ref().and_then(Outcome::success)
    }

    /// Failure reason of a domain that was run but produced no score.
    pub fn domain_error(&self, domain: Domain) -> Option<&str> {
        match domain {
            Domain::Cpu => self.cpu.as_ref().and_then(Outcome::error),
            Domain::Memory => self.memory.as_ref().and_then(Outcome::error),
            Domain::Disk => self.disk.as_ref().and_then(Outcome::error),
            Domain::Network => self.network.as_ref().and_then(Outcome::error),
        }
    }

    pub fn is_present(&self, domain: Domain) -> bool {
        match domain {
            Domain::Cpu => self.cpu.is_some(),
            Domain::Memory => self.memory.is_some(),
            Domain::Disk => self.disk.is_some(),
            Domain::Network => self.network.is_some(),
        }
    }

    /// Raw value behind a disk pattern score, if that pattern succeeded.
    pub fn disk_pattern(&self, pattern: IoPattern) -> Option<&MetricScore> {
        self.disk
            .as_ref()
            .and_then(Outcome::success)
            .and_then(|d| d.patterns.get(&pattern))
            .and_then(Outcome::success)
    }
}

/// One value per domain (weights, thresholds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerDomain<T> {
    pub cpu: T,
    pub memory: T,
    pub disk: T,
    pub network: T,
}

impl<T> PerDomain<T> {
    pub fn new(cpu: T, memory: T, disk: T, network: T) -> Self {
        PerDomain {
            cpu,
            memory,
            disk,
            network,
        }
    }

    pub fn get(&self, domain: Domain) -> &T {
        match domain {
            Domain::Cpu => &self.cpu,
            Domain::Memory => &self.memory,
            Domain::Disk => &self.disk,
            Domain::Network => &self.network,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Domain, &T)> {
        Domain::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// A benchmarked machine under comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub name: String,
    pub normalized: NormalizedResults,
    #[serde(default)]
    pub cost: Option<f64>,
}

impl SystemRecord {
    pub fn new(name: impl Into<String>, normalized: NormalizedResults, cost: Option<f64>) -> Self {
        SystemRecord {
            name: name.into(),
            normalized,
            cost,
        }
    }
}

/// Workload-specific verdict for one system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub system_name: String,
    pub workload_score: f64,
    pub meets_requirements: bool,
    pub cost: Option<f64>,
    /// Cost per workload-score point
    pub cost_performance_ratio: Option<f64>,
}
