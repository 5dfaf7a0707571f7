//! Confidence intervals for rating difference estimates

use crate::error::{EloError, Result};
use serde::{Deserialize, Serialize};
use statrs::function::erf::erf_inv;
use std::f64::consts::SQRT_2;

/// Two-sided interval on the rating difference
///
/// A side whose score bound reached 0 or 1 is reported as an infinite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// Confidence level in `[0, 1]`
    pub percentile: f64,
}

impl ConfidenceInterval {
    pub fn is_lower_infinite(&self) -> bool {
        self.lower.is_infinite()
    }

    pub fn is_upper_infinite(&self) -> bool {
        self.upper.is_infinite()
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Reject confidence levels outside `[0, 1]`
pub fn validate_percentile(percentile: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&percentile) {
        return Err(EloError::InvalidInput {
            reason: format!("p must be between 0 and 1 (inclusive), got {}", percentile),
        }
        .into());
    }
    Ok(())
}

/// Two-sided standard normal critical value, `Phi^-1((1 + percentile) / 2)`
pub(crate) fn critical_value(percentile: f64) -> f64 {
    if percentile >= 1.0 {
        f64::INFINITY
    } else if percentile <= 0.0 {
        0.0
    } else {
        SQRT_2 * erf_inv(percentile)
    }
}

/// Normal-approximation bounds on the observed score fraction
///
/// `score` is the fraction of points won over `games` games, with draws
/// counted as half a point. The returned bounds are not clipped.
pub(crate) fn score_bounds(score: f64, games: u64, percentile: f64) -> (f64, f64) {
    let standard_error = (score * (1.0 - score) / games as f64).sqrt();
    let margin = critical_value(percentile) * standard_error;
    (score - margin, score + margin)
}
