//! Side-by-side comparison of several benchmarked systems.

use crate::models::{Domain, SystemRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band of a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreBand {
    Poor,
    BelowAverage,
    Fair,
    Good,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::Good
        } else if score >= 50.0 {
            ScoreBand::Fair
        } else if score >= 30.0 {
            ScoreBand::BelowAverage
        } else {
            ScoreBand::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::BelowAverage => "Below Average",
            ScoreBand::Poor => "Poor",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Highest successful score for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainWinner {
    pub domain: Domain,
    pub system: String,
    pub score: f64,
}

/// Run-to-run stability of one system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemVariance {
    pub system: String,
    /// Mean `variance_percent` over the successful cpu and memory scores
    pub average_variance_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub best_overall: Option<OverallWinner>,
    pub domain_winners: Vec<DomainWinner>,
    pub variance: Vec<SystemVariance>,
    /// Mean cpu and memory `variance_percent` over all systems; a missing or
    /// failed score counts as 0
    #[serde(default)]
    pub fleet_average_variance_percent: f64,
}

/// System with the highest overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallWinner {
    pub system: String,
    pub overall_score: f64,
}

/// Keep the first maximum, unlike `Iterator::max_by` which keeps the last.
fn first_max<'a, I>(candidates: I) -> Option<(&'a str, f64)>
where
    I: Iterator<Item = (&'a str, f64)>,
{
    candidates.fold(None, |best, (name, score)| match best {
        Some((_, best_score)) if score <= best_score => best,
        _ => Some((name, score)),
    })
}

impl ComparisonSummary {
    pub fn from_systems(systems: &[SystemRecord]) -> Self {
        let best_overall = first_max(
            systems
                .iter()
                .map(|s| (s.name.as_str(), s.normalized.overall_score)),
        )
        .map(|(system, overall_score)| OverallWinner {
            system: system.to_string(),
            overall_score,
        });

        let domain_winners = Domain::ALL
            .iter()
            .filter_map(|&domain| {
                first_max(systems.iter().filter_map(|s| {
                    s.normalized
                        .domain_score(domain)
                        .map(|score| (s.name.as_str(), score))
                }))
                .map(|(system, score)| DomainWinner {
                    domain,
                    system: system.to_string(),
                    score,
                })
            })
            .collect();

        let variance = systems
            .iter()
            .map(|s| {
                let samples: Vec<f64> = [Domain::Cpu, Domain::Memory]
                    .iter()
                    .filter_map(|&d| s.normalized.metric_score(d))
                    .map(|m| m.variance_percent)
                    .collect();
                SystemVariance {
                    system: s.name.clone(),
                    average_variance_percent: if samples.is_empty() {
                        None
                    } else {
                        Some(samples.iter().sum::<f64>() / samples.len() as f64)
                    },
                }
            })
            .collect();

        let fleet_samples: Vec<f64> = systems
            .iter()
            .flat_map(|s| {
                [Domain::Cpu, Domain::Memory].map(|d| {
                    s.normalized
                        .metric_score(d)
                        .map(|m| m.variance_percent)
                        .unwrap_or(0.0)
                })
            })
            .collect();
        let fleet_average_variance_percent = if fleet_samples.is_empty() {
            0.0
        } else {
            fleet_samples.iter().sum::<f64>() / fleet_samples.len() as f64
        };

        ComparisonSummary {
            best_overall,
            domain_winners,
            variance,
            fleet_average_variance_percent,
        }
    }

    pub fn winner(&self, domain: Domain) -> Option<&DomainWinner> {
        self.domain_winners.iter().find(|w| w.domain == domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricScore, NormalizedResults, Outcome};

    fn metric(score: f64, variance: f64) -> Option<Outcome<MetricScore>> {
        Some(Outcome::Success(MetricScore {
            score,
            raw_value: 0.0,
            metric_name: "m".to_string(),
            variance_percent: variance,
        }))
    }

    fn system(name: &str, cpu: f64, overall: f64) -> SystemRecord {
        SystemRecord::new(
            name,
            NormalizedResults {
                cpu: metric(cpu, 2.0),
                memory: metric(50.0, 4.0),
                disk: Some(Outcome::failure("fio not found")),
                overall_score: overall,
                ..Default::default()
            },
            None,
        )
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(70.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(69.99), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(30.0), ScoreBand::BelowAverage);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Poor);
        assert_eq!(ScoreBand::BelowAverage.to_string(), "Below Average");
    }

    #[test]
    fn test_winners_skip_failed_domains() {
        let systems = vec![system("alpha", 60.0, 55.0), system("beta", 80.0, 55.0)];
        let summary = ComparisonSummary::from_systems(&systems);

        let best = summary.best_overall.as_ref().unwrap();
        assert_eq!(best.system, "alpha");
        assert_eq!(summary.winner(Domain::Cpu).unwrap().system, "beta");
        assert_eq!(summary.winner(Domain::Memory).unwrap().system, "alpha");
        assert!(summary.winner(Domain::Disk).is_none());
        assert!(summary.winner(Domain::Network).is_none());
    }

    #[test]
    fn test_average_variance() {
        let mut systems = vec![system("alpha", 60.0, 55.0)];
        systems.push(SystemRecord::new("empty", NormalizedResults::default(), None));
        let summary = ComparisonSummary::from_systems(&systems);
        assert_eq!(summary.variance[0].average_variance_percent, Some(3.0));
        assert_eq!(summary.variance[1].average_variance_percent, None);
        // (2 + 4 + 0 + 0) / 4: the empty system still counts
        assert_eq!(summary.fleet_average_variance_percent, 1.5);
    }

    #[test]
    fn test_no_systems() {
        let summary = ComparisonSummary::from_systems(&[]);
        assert!(summary.best_overall.is_none());
        assert!(summary.domain_winners.is_empty());
        assert_eq!(summary.fleet_average_variance_percent, 0.0);
    }
}
