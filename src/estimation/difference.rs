//! Rating difference point estimates
//!
//! The observed score fraction `s = (wins + draws / 2) / games` is mapped
//! back through the probability model: the estimate is the rating gap `d`
//! with `cdf(d, 0) == s`. A clean sweep either way has no finite estimate.

use crate::error::{EloError, Result};
use crate::estimation::interval::{score_bounds, ConfidenceInterval};
use crate::rating::distribution::Distribution;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_PERCENTILE: f64 = 0.95;

/// Head-to-head results of player A against player B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameTally {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl GameTally {
    pub fn new(wins: u32, draws: u32, losses: u32) -> Self {
        Self {
            wins,
            draws,
            losses,
        }
    }

    pub fn games(&self) -> u64 {
        self.wins as u64 + self.draws as u64 + self.losses as u64
    }

    /// Fraction of points scored by player A, draws counting half
    pub fn score_fraction(&self) -> f64 {
        (self.wins as f64 + 0.5 * self.draws as f64) / self.games() as f64
    }

    pub fn validate(&self) -> Result<()> {
        if self.games() == 0 {
            return Err(EloError::InvalidInput {
                reason: "The number of games must be positive.".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Estimated rating of player A minus rating of player B
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingDifferenceEstimate {
    /// Positive infinity for a clean sweep by A, negative infinity for one by B
    pub estimate: f64,
    pub is_infinite: bool,
    /// Confidence level that was requested, kept even when no interval exists
    pub percentile: Option<f64>,
    /// Present when an interval was requested and the estimate is finite
    pub interval: Option<ConfidenceInterval>,
}

/// Estimator bound to a probability model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Estimator {
    distribution: Distribution,
}

impl Estimator {
    pub fn new(distribution: Distribution) -> Self {
        Self { distribution }
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Point estimate only
    ///
    /// The tally must contain at least one game.
    pub fn estimate(&self, tally: GameTally) -> RatingDifferenceEstimate {
        self.run(tally, None)
    }

    /// Point estimate plus an interval at `percentile` confidence
    ///
    /// `percentile` must lie in `[0, 1]`.
    pub fn estimate_with_interval(
        &self,
        tally: GameTally,
        percentile: f64,
    ) -> RatingDifferenceEstimate {
        self.run(tally, Some(percentile))
    }

    fn run(&self, tally: GameTally, percentile: Option<f64>) -> RatingDifferenceEstimate {
        debug_assert!(tally.games() > 0, "estimate needs at least one game");

        let score = tally.score_fraction();
        let estimate = self.distribution.quantile(score, 0.0);
        let is_infinite = score <= 0.0 || score >= 1.0;

        let interval = match percentile {
            Some(percentile) if !is_infinite => {
                debug_assert!((0.0..=1.0).contains(&percentile));
                let (low, high) = score_bounds(score, tally.games(), percentile);
                Some(ConfidenceInterval {
                    lower: self.distribution.quantile(low, 0.0),
                    upper: self.distribution.quantile(high, 0.0),
                    percentile,
                })
            }
            _ => None,
        };

        debug!(
            wins = tally.wins,
            draws = tally.draws,
            losses = tally.losses,
            score,
            estimate,
            is_infinite,
            "Estimated rating difference"
        );

        RatingDifferenceEstimate {
            estimate,
            is_infinite,
            percentile,
            interval,
        }
    }
}

/// Rating difference under the classic Elo logistic model
pub fn estimate_rating_difference(wins: u32, draws: u32, losses: u32) -> RatingDifferenceEstimate {
    Estimator::default().estimate(GameTally::new(wins, draws, losses))
}

/// Rating difference and interval under the classic Elo logistic model
pub fn estimate_rating_difference_interval(
    wins: u32,
    draws: u32,
    losses: u32,
    percentile: f64,
) -> RatingDifferenceEstimate {
    Estimator::default().estimate_with_interval(GameTally::new(wins, draws, losses), percentile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_even_record_has_zero_gap() {
        let est = estimate_rating_difference(5, 0, 5);
        assert!(!est.is_infinite);
        assert_abs_diff_eq!(est.estimate, 0.0, epsilon = 1e-9);
        assert!(est.interval.is_none());

        let est = estimate_rating_difference(0, 8, 0);
        assert_abs_diff_eq!(est.estimate, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clean_sweeps_are_infinite() {
        let est = estimate_rating_difference(5, 0, 0);
        assert!(est.is_infinite);
        assert_eq!(est.estimate, f64::INFINITY);

        let est = estimate_rating_difference(0, 0, 5);
        assert!(est.is_infinite);
        assert_eq!(est.estimate, f64::NEG_INFINITY);

        let est = estimate_rating_difference_interval(0, 0, 10, 0.95);
        assert!(est.is_infinite);
        assert!(est.interval.is_none());
    }

    #[test]
    fn test_known_logistic_values() {
        // 10 points out of 11 is a 400 point gap
        let est = estimate_rating_difference(10, 0, 1);
        assert_abs_diff_eq!(est.estimate, 400.0, epsilon = 1e-9);

        // 75% score
        let est = estimate_rating_difference(3, 0, 1);
        assert_abs_diff_eq!(est.estimate, -400.0 * (1.0f64 / 3.0).log10(), epsilon = 1e-9);
        assert_abs_diff_eq!(est.estimate, 190.848, epsilon = 1e-3);

        let est = estimate_rating_difference(1, 0, 3);
        assert_abs_diff_eq!(est.estimate, -190.848, epsilon = 1e-3);
    }

    #[test]
    fn test_draws_count_half() {
        let with_draws = estimate_rating_difference(2, 2, 0);
        let equivalent = estimate_rating_difference(3, 0, 1);
        assert_abs_diff_eq!(with_draws.estimate, equivalent.estimate, epsilon = 1e-9);
    }

    #[test]
    fn test_unbeaten_small_sample_has_open_upper_bound() {
        let est = estimate_rating_difference_interval(3, 2, 0, 0.95);
        assert!(!est.is_infinite);
        assert_abs_diff_eq!(est.estimate, 400.0 * 4f64.log10(), epsilon = 1e-9);

        let interval = est.interval.unwrap();
        assert!(interval.is_upper_infinite());
        assert!(!interval.is_lower_infinite());
        assert!(interval.lower < est.estimate);
        assert_eq!(interval.percentile, 0.95);
    }

    #[test]
    fn test_interval_brackets_estimate() {
        let est = estimate_rating_difference_interval(30, 20, 10, 0.95);
        let interval = est.interval.unwrap();
        assert!(interval.lower < est.estimate);
        assert!(est.estimate < interval.upper);
        assert!(interval.lower.is_finite() && interval.upper.is_finite());
    }

    #[test]
    fn test_interval_tightens_with_sample_size() {
        let small = estimate_rating_difference_interval(6, 2, 4, 0.95).interval.unwrap();
        let large = estimate_rating_difference_interval(600, 200, 400, 0.95).interval.unwrap();
        assert!(large.width() < small.width());
    }

    #[test]
    fn test_interval_widens_with_confidence() {
        let narrow = estimate_rating_difference_interval(12, 3, 9, 0.5).interval.unwrap();
        let wide = estimate_rating_difference_interval(12, 3, 9, 0.99).interval.unwrap();
        assert!(wide.width() > narrow.width());

        let degenerate = estimate_rating_difference_interval(12, 3, 9, 0.0);
        let interval = degenerate.interval.unwrap();
        assert_abs_diff_eq!(interval.lower, degenerate.estimate, epsilon = 1e-9);
        assert_abs_diff_eq!(interval.upper, degenerate.estimate, epsilon = 1e-9);

        let full = estimate_rating_difference_interval(12, 3, 9, 1.0).interval.unwrap();
        assert!(full.is_lower_infinite() && full.is_upper_infinite());
    }

    #[test]
    fn test_normal_model_estimator() {
        let estimator = Estimator::new(Distribution::normal(200.0).unwrap());
        let est = estimator.estimate(GameTally::new(8413, 0, 1587));
        assert_abs_diff_eq!(est.estimate, 200.0, epsilon = 0.1);

        let est = estimator.estimate(GameTally::new(4, 0, 4));
        assert_abs_diff_eq!(est.estimate, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trip_through_cdf() {
        let dist = Distribution::default();
        for (w, d, l) in [(7, 1, 2), (1, 9, 0), (2, 0, 13), (50, 25, 25)] {
            let tally = GameTally::new(w, d, l);
            let est = Estimator::default().estimate(tally);
            assert_abs_diff_eq!(
                dist.cdf(est.estimate, 0.0),
                tally.score_fraction(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_tally_validation() {
        assert!(GameTally::new(0, 0, 0).validate().is_err());
        assert!(GameTally::new(0, 1, 0).validate().is_ok());
        assert_eq!(GameTally::new(3, 2, 0).score_fraction(), 0.8);
        assert_eq!(GameTally::new(u32::MAX, u32::MAX, 1).games(), 2 * u32::MAX as u64 + 1);
    }

    #[test]
    fn test_percentile_kept_without_interval() {
        let estimator = Estimator::default();

        let sweep = estimator.estimate_with_interval(GameTally::new(5, 0, 0), 0.95);
        assert!(sweep.is_infinite);
        assert!(sweep.interval.is_none());
        assert_eq!(sweep.percentile, Some(0.95));

        let finite = estimator.estimate_with_interval(GameTally::new(5, 2, 3), 0.9);
        assert_eq!(finite.percentile, Some(0.9));
        assert_eq!(finite.interval.map(|i| i.percentile), Some(0.9));

        assert_eq!(estimator.estimate(GameTally::new(5, 2, 3)).percentile, None);
    }
}
