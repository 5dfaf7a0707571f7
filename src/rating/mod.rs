//! Pairwise Elo rating updates
//!
//! This module provides the probability models, the shared configuration
//! binding a model to a K-factor rule, rated players and the match update.

pub mod configuration;
pub mod distribution;
pub mod matches;
pub mod player;

// Re-export commonly used types
pub use configuration::{Configuration, KFactor, SharedConfiguration, DEFAULT_K_FACTOR};
pub use distribution::{Distribution, Logistic, Normal};
pub use matches::Match;
pub use player::{MatchRecord, Player, DEFAULT_INITIAL_RATING};
