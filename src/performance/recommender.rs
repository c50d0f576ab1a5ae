//! Workload-specific recommendations
//!
//! Scores each system against a workload profile, checks the profile's
//! per-domain minimums, ranks the systems and picks the best-value one.
//!
//! Unlike the overall score, a workload score is *not* renormalized: a
//! domain that failed or was never run counts as 0, so a system missing
//! data for a heavily weighted domain falls down the ranking.

use super::normalizer::round2;
use crate::config::profiles::{find_profile, get_available_profiles, WorkloadProfile};
use crate::models::{Domain, Recommendation, SystemRecord};
use serde::{Deserialize, Serialize};

/// Domain score used for workload scoring: 0 when absent or failed,
/// clamped to 0-100 otherwise.
fn effective_score(system: &SystemRecord, domain: Domain) -> f64 {
    match system.normalized.domain_score(domain) {
        Some(score) if !score.is_nan() => score.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Weighted workload score, rounded to two decimals.
pub fn score_for_workload(system: &SystemRecord, profile: &WorkloadProfile) -> f64 {
    let total: f64 = Domain::ALL
        .iter()
        .map(|&domain| profile.weight(domain) * effective_score(system, domain))
        .sum();
    round2(total)
}

/// True when every domain reaches the profile's minimum.
pub fn meets_requirements(system: &SystemRecord, profile: &WorkloadProfile) -> bool {
    Domain::ALL
        .iter()
        .all(|&domain| effective_score(system, domain) >= profile.min_score(domain))
}

/// Build the recommendation record for one system.
pub fn recommend(system: &SystemRecord, profile: &WorkloadProfile) -> Recommendation {
    let workload_score = score_for_workload(system, profile);
    let cost_performance_ratio = match system.cost {
        Some(cost) if cost.is_finite() && cost > 0.0 && workload_score > 0.0 => {
            Some(cost / workload_score)
        }
        _ => None,
    };

    Recommendation {
        system_name: system.name.clone(),
        workload_score,
        meets_requirements: meets_requirements(system, profile),
        cost: system.cost,
        cost_performance_ratio,
    }
}

/// Recommendations for all systems, best workload score first.
///
/// Ties keep input order.
pub fn rank(systems: &[SystemRecord], profile: &WorkloadProfile) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> =
        systems.iter().map(|s| recommend(s, profile)).collect();
    recommendations.sort_by(|a, b| b.workload_score.total_cmp(&a.workload_score));
    recommendations
}

/// Top of a ranking.
pub fn best_performance(recommendations: &[Recommendation]) -> Option<&Recommendation> {
    recommendations.first()
}

/// Lowest cost per workload-score point. `None` when no system has cost data.
pub fn best_value(recommendations: &[Recommendation]) -> Option<&Recommendation> {
    recommendations
        .iter()
        .filter_map(|r| r.cost_performance_ratio.map(|ratio| (ratio, r)))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, r)| r)
}

/// One cell of the workload × system matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadMatrixEntry {
    pub workload: String,
    pub system: String,
    pub score: f64,
    pub meets_requirements: bool,
    pub cost: Option<f64>,
}

/// Recommendation session: a profile table plus the systems added so far.
#[derive(Debug, Clone)]
pub struct Recommender {
    profiles: Vec<WorkloadProfile>,
    systems: Vec<SystemRecord>,
}

impl Recommender {
    /// Session over the built-in profiles
    pub fn new() -> Self {
        Self::with_profiles(get_available_profiles())
    }

    pub fn with_profiles(profiles: Vec<WorkloadProfile>) -> Self {
        Recommender {
            profiles,
            systems: Vec::new(),
        }
    }

    pub fn add_system(&mut self, system: SystemRecord) {
        log::debug!(
            "[Recommender] Added system '{}' (overall {:.2})",
            system.name,
            system.normalized.overall_score
        );
        self.systems.push(system);
    }

    pub fn systems(&self) -> &[SystemRecord] {
        &self.systems
    }

    pub fn profile(&self, name: &str) -> Option<&WorkloadProfile> {
        find_profile(&self.profiles, name)
    }

    /// Ranked recommendations for a named workload.
    ///
    /// An unknown workload yields an empty list.
    pub fn recommend_for_workload(&self, workload: &str) -> Vec<Recommendation> {
        match self.profile(workload) {
            Some(profile) => rank(&self.systems, profile),
            None => {
                log::warn!(
                    "[Recommender] Unknown workload profile '{}', available: {}",
                    workload,
                    self.profiles
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                Vec::new()
            }
        }
    }

    /// Every profile against every system, in profile then system order.
    pub fn workload_matrix(&self) -> Vec<WorkloadMatrixEntry> {
        self.profiles
            .iter()
            .flat_map(|profile| {
                self.systems.iter().map(move |system| WorkloadMatrixEntry {
                    workload: profile.name.clone(),
                    system: system.name.clone(),
                    score: score_for_workload(system, profile),
                    meets_requirements: meets_requirements(system, profile),
                    cost: system.cost,
                })
            })
            .collect()
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}
