//! Workload profiles.

use crate::models::{Domain, PerDomain};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref PROFILES: Vec<WorkloadProfile> = vec![
        WorkloadProfile::new(
            "web_server",
            "Request serving: CPU and memory bound with moderate network demand",
            PerDomain::new(0.35, 0.30, 0.20, 0.15),
            PerDomain::new(60.0, 50.0, 40.0, 50.0),
        ),
        WorkloadProfile::new(
            "database",
            "OLTP/analytics database: memory and storage heavy",
            PerDomain::new(0.30, 0.35, 0.30, 0.05),
            PerDomain::new(70.0, 80.0, 75.0, 30.0),
        ),
        WorkloadProfile::new(
            "file_server",
            "File and object storage: disk throughput first, network second",
            PerDomain::new(0.15, 0.20, 0.50, 0.15),
            PerDomain::new(40.0, 50.0, 80.0, 60.0),
        ),
        WorkloadProfile::new(
            "compute_intensive",
            "Batch computation, rendering, simulation",
            PerDomain::new(0.60, 0.25, 0.10, 0.05),
            PerDomain::new(85.0, 70.0, 40.0, 30.0),
        ),
        WorkloadProfile::new(
            "general_purpose",
            "Mixed workloads with no dominant resource",
            PerDomain::new(0.30, 0.25, 0.25, 0.20),
            PerDomain::new(60.0, 60.0, 60.0, 50.0),
        ),
    ];
}

/// Weights and minimum scores describing a target use case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Conventionally sums to 1.0 (not enforced)
    pub weights: PerDomain<f64>,
    /// Minimum acceptable normalized score per domain
    pub min_scores: PerDomain<f64>,
}

impl WorkloadProfile {
    pub fn new(
        name: &str,
        description: &str,
        weights: PerDomain<f64>,
        min_scores: PerDomain<f64>,
    ) -> Self {
        WorkloadProfile {
            name: name.to_string(),
            description: description.to_string(),
            weights,
            min_scores,
        }
    }

    pub fn weight(&self, domain: Domain) -> f64 {
        *self.weights.get(domain)
    }

    pub fn min_score(&self, domain: Domain) -> f64 {
        *self.min_scores.get(domain)
    }

    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().map(|(_, w)| *w).sum()
    }
}

/// Built-in profiles, in report order.
pub fn get_available_profiles() -> Vec<WorkloadProfile> {
    PROFILES.clone()
}

/// Built-in profile by name (case-insensitive).
pub fn get_profile(name: &str) -> Option<WorkloadProfile> {
    find_profile(&PROFILES, name).cloned()
}

/// Case-insensitive lookup in any profile list.
pub fn find_profile<'a>(profiles: &'a [WorkloadProfile], name: &str) -> Option<&'a WorkloadProfile> {
    let wanted = name.trim().to_lowercase();
    profiles.iter().find(|p| p.name.to_lowercase() == wanted)
}
