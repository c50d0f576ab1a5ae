//! Benchmark Scoring Pipeline
//!
//! Turns raw benchmark measurements into comparable 0-100 scores and
//! workload-specific recommendations. Nothing in here touches the
//! filesystem; see [`crate::results`] for persistence.
//!
//! ## Architecture
//! - **Aggregator**: Collapses repeated runs into per-metric statistics (fail-fast on run errors)
//! - **Normalizer**: Maps run-set means onto 0-100 against a baseline table
//! - **Overall**: Weighted mean of the successful domain scores
//! - **Recommender**: Workload scoring, requirement checks, ranking and best-value selection
//! - **Comparison**: Best overall system, per-domain winners and run stability across systems

pub mod aggregator;
pub mod comparison;
pub mod normalizer;
pub mod overall;
pub mod recommender;

pub use aggregator::{aggregate, aggregate_domain, summarize, EMPTY_RUN_SET};
pub use comparison::{ComparisonSummary, DomainWinner, OverallWinner, ScoreBand, SystemVariance};
pub use normalizer::{normalize_value, round2, Normalizer, NO_DISK_PATTERNS};
pub use overall::overall_score;
pub use recommender::{
    best_performance, best_value, meets_requirements, rank, recommend, score_for_workload,
    Recommender, WorkloadMatrixEntry,
};
