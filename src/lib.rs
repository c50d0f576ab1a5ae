//! hwbench: hardware benchmark scoring engine
//!
//! Turns raw CPU, memory, disk and network benchmark measurements into
//! comparable 0-100 scores, an overall score per machine, and
//! workload-specific recommendations across machines.
//!
//! The system is organized into functional modules:
//! - **error**: Infrastructure error types (config files, results directories)
//! - **models**: Core data structures and their on-disk JSON shapes
//! - **config**: Baseline table, overall weights and workload profiles
//! - **performance**: Aggregation, normalization, overall scoring, recommendation, comparison
//! - **results**: Per-system results directory persistence
//! - **report**: Plain-text and CSV rendering
//! - **log_collector**: `log` backend used by the binary

// Core foundational modules
pub mod error;
pub mod models;

// Scoring tables (baselines, weights, workload profiles)
pub mod config;

// Scoring pipeline
pub mod performance;

// Persistence and rendering around the pipeline
pub mod report;
pub mod results;

// Logging backend
pub mod log_collector;

// Re-export the log crate for macro usage
pub use log;

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{ConfigError, ResultsError};

pub use models::{
    DiskRawResults,
    DiskScore,
    // Enums
    Domain,
    IoPattern,
    // Scores
    MetricScore,
    // Raw data
    MetricStatistics,
    NormalizedResults,
    Outcome,
    PerDomain,
    RawResults,
    Recommendation,
    RunMetrics,
    RunRecord,
    RunSetOutcome,
    RunSetSummary,
    SystemRecord,
};

pub use config::{Baseline, BaselineTable, MetricSource, ScoringConfig, WorkloadProfile};

pub use performance::{
    aggregate, aggregate_domain, best_performance, best_value, meets_requirements,
    normalize_value, overall_score, rank, recommend, score_for_workload, ComparisonSummary,
    Normalizer, Recommender, ScoreBand, WorkloadMatrixEntry,
};

pub use report::PerformanceRating;

pub use log_collector::{init_logging, LogCollector};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
