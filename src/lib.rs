//! Elo Rating - pairwise rating updates and rating difference estimates
//!
//! This crate provides an Elo-style rating engine with pluggable probability
//! models and K-factor rules, and an estimator that recovers the rating gap
//! between two players from their head-to-head results.

pub mod cli;
pub mod config;
pub mod error;
pub mod estimation;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{EloError, Result};
pub use types::*;

// Re-export key components
pub use estimation::{
    estimate_rating_difference, estimate_rating_difference_interval, Estimator,
    RatingDifferenceEstimate,
};
pub use rating::{Configuration, Distribution, KFactor, Match, Player, SharedConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
