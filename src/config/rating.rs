//! Rating pool configuration

use crate::error::{EloError, Result};
use crate::rating::distribution::{
    Distribution, DEFAULT_LOGISTIC_BASE, DEFAULT_LOGISTIC_SCALE, DEFAULT_NORMAL_STDEV,
};
use crate::rating::{
    Configuration, KFactor, Player, SharedConfiguration, DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR,
};
use serde::{Deserialize, Serialize};

/// Which probability model to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    Logistic,
    Normal,
}

impl std::str::FromStr for ModelKind {
    type Err = EloError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" => Ok(ModelKind::Logistic),
            "normal" => Ok(ModelKind::Normal),
            other => Err(EloError::ConfigurationError {
                message: format!("Unknown model '{}', expected logistic or normal", other),
            }),
        }
    }
}

/// How the K-factor is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KFactorPolicy {
    /// Always `k_factor`
    #[default]
    Constant,
    /// 40 provisional, 20 established, 10 from 2400
    Banded,
}

/// Probability model parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionSettings {
    pub model: ModelKind,
    /// Logistic log base
    pub base: f64,
    /// Logistic scale
    pub scale: f64,
    /// Normal standard deviation
    pub stdev: f64,
}

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            model: ModelKind::Logistic,
            base: DEFAULT_LOGISTIC_BASE,
            scale: DEFAULT_LOGISTIC_SCALE,
            stdev: DEFAULT_NORMAL_STDEV,
        }
    }
}

impl DistributionSettings {
    pub fn build(&self) -> Result<Distribution> {
        match self.model {
            ModelKind::Logistic => Distribution::logistic(self.base, self.scale),
            ModelKind::Normal => Distribution::normal(self.stdev),
        }
    }
}

/// Rating pool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Rating given to new players
    pub initial_rating: f64,
    pub k_factor: f64,
    pub k_policy: KFactorPolicy,
    pub distribution: DistributionSettings,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_rating: DEFAULT_INITIAL_RATING,
            k_factor: DEFAULT_K_FACTOR,
            k_policy: KFactorPolicy::Constant,
            distribution: DistributionSettings::default(),
        }
    }
}

impl RatingSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_rating.is_finite() {
            return Err(EloError::ConfigurationError {
                message: "Initial rating must be finite".to_string(),
            }
            .into());
        }

        if !(self.k_factor.is_finite() && self.k_factor > 0.0) {
            return Err(EloError::ConfigurationError {
                message: "K must be positive.".to_string(),
            }
            .into());
        }

        self.distribution.build()?;
        Ok(())
    }

    /// Build the configuration for a rating pool
    pub fn build_configuration(&self) -> Result<Configuration> {
        self.validate()?;

        let k_factor = match self.k_policy {
            KFactorPolicy::Constant => KFactor::Constant(self.k_factor),
            KFactorPolicy::Banded => KFactor::banded(),
        };
        Ok(Configuration::new(k_factor, self.distribution.build()?))
    }

    /// Build a shared pool that players can join
    pub fn build_pool(&self) -> Result<SharedConfiguration> {
        Ok(SharedConfiguration::new(self.build_configuration()?))
    }

    /// New player at the configured initial rating, bound to `pool`
    pub fn new_player(&self, pool: &SharedConfiguration) -> Player {
        Player::with_config(self.initial_rating, pool)
    }
}
