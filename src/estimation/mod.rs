//! Rating difference estimation from head-to-head results
//!
//! Inverts a probability model to recover the rating gap implied by a tally
//! of wins, draws and losses, optionally with a confidence interval.

pub mod difference;
pub mod interval;

// Re-export commonly used types
pub use difference::{
    estimate_rating_difference, estimate_rating_difference_interval, Estimator, GameTally,
    RatingDifferenceEstimate, DEFAULT_PERCENTILE,
};
pub use interval::{validate_percentile, ConfidenceInterval};
