//! Configuration management for the elo tool
//!
//! This module handles configuration loading from environment variables or a
//! TOML file, validation, and default values for the rating pool and the
//! estimator.

pub mod app;
pub mod estimator;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use estimator::EstimatorSettings;
pub use rating::{DistributionSettings, KFactorPolicy, ModelKind, RatingSettings};
