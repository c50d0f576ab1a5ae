//! Overall score: a weighted mean of the domain scores that succeeded.

use super::normalizer::round2;
use crate::models::{Domain, NormalizedResults, PerDomain};

/// Weighted mean over the error-free domains, rounded to two decimals.
///
/// Failed and absent domains drop out of both the sum and the weight total,
/// so the remaining weights are renormalized. Returns 0 when nothing
/// contributes.
pub fn overall_score(results: &NormalizedResults, weights: &PerDomain<f64>) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for domain in Domain::ALL {
        if let Some(score) = results.domain_score(domain) {
            let weight = *weights.get(domain);
            weighted_sum += score * weight;
            weight_total += weight;
        }
    }

    if weight_total > 0.0 {
        round2(weighted_sum / weight_total)
    } else {
        0.0
    }
}
