//! Main application configuration
//!
//! This module defines the primary configuration structures for the elo
//! tool, including environment variable and TOML file loading and validation.

use crate::config::estimator::EstimatorSettings;
use crate::config::rating::RatingSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingSettings,
    pub estimator: EstimatorSettings,
}

/// Process-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text without consulting the environment
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|e| anyhow!("Invalid configuration file: {}", e))?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(level) = env::var("ELO_LOG_LEVEL") {
            self.service.log_level = level;
        }
        if let Ok(rating) = env::var("ELO_INITIAL_RATING") {
            self.rating.initial_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_INITIAL_RATING value: {}", rating))?;
        }
        if let Ok(k) = env::var("ELO_K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_K_FACTOR value: {}", k))?;
        }
        if let Ok(model) = env::var("ELO_MODEL") {
            self.rating.distribution.model = model.parse()?;
        }
        if let Ok(base) = env::var("ELO_LOGISTIC_BASE") {
            self.rating.distribution.base = base
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_LOGISTIC_BASE value: {}", base))?;
        }
        if let Ok(scale) = env::var("ELO_LOGISTIC_SCALE") {
            self.rating.distribution.scale = scale
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_LOGISTIC_SCALE value: {}", scale))?;
        }
        if let Ok(stdev) = env::var("ELO_NORMAL_STDEV") {
            self.rating.distribution.stdev = stdev
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_NORMAL_STDEV value: {}", stdev))?;
        }
        if let Ok(percentile) = env::var("ELO_PERCENTILE") {
            self.estimator.percentile = percentile
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_PERCENTILE value: {}", percentile))?;
        }
        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.validate()?;
    config.estimator.validate()?;

    Ok(())
}
