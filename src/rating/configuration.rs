//! Rating configuration shared by a pool of players
//!
//! A [`Configuration`] binds a probability model to a K-factor rule. Players
//! hold it through a [`SharedConfiguration`] handle, so changing the model or
//! the K-factor through any handle is seen by every player in the pool on
//! their next update.

use crate::error::{EloError, Result};
use crate::rating::distribution::Distribution;
use crate::types::{PlayerState, Rating};
use std::sync::{Arc, RwLock};

pub const DEFAULT_K_FACTOR: f64 = 32.0;

// Banded K-factor policy
const K_PROVISIONAL_GAMES: usize = 30;
const K_ELITE_RATING: f64 = 2400.0;
const K_PROVISIONAL: f64 = 40.0;
const K_ESTABLISHED: f64 = 20.0;
const K_ELITE: f64 = 10.0;

/// Strategy computing a K-factor from a player's current state
pub type KFactorFn = Arc<dyn Fn(&PlayerState) -> f64 + Send + Sync>;

/// Maximum rating change per game
#[derive(Clone)]
pub enum KFactor {
    Constant(f64),
    /// Evaluated against the player's state at every update, never cached
    Dynamic(KFactorFn),
}

impl KFactor {
    pub fn dynamic<F>(strategy: F) -> Self
    where
        F: Fn(&PlayerState) -> f64 + Send + Sync + 'static,
    {
        KFactor::Dynamic(Arc::new(strategy))
    }

    /// 40 for the first 30 games, then 20, dropping to 10 from 2400 upwards
    pub fn banded() -> Self {
        Self::dynamic(|state| {
            if state.games_played < K_PROVISIONAL_GAMES {
                K_PROVISIONAL
            } else if state.rating >= K_ELITE_RATING {
                K_ELITE
            } else {
                K_ESTABLISHED
            }
        })
    }

    pub fn resolve(&self, state: &PlayerState) -> f64 {
        match self {
            KFactor::Constant(k) => *k,
            KFactor::Dynamic(strategy) => strategy(state),
        }
    }
}

impl Default for KFactor {
    fn default() -> Self {
        KFactor::Constant(DEFAULT_K_FACTOR)
    }
}

impl std::fmt::Debug for KFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KFactor::Constant(k) => f.debug_tuple("Constant").field(k).finish(),
            KFactor::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Probability model plus K-factor rule
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    distribution: Distribution,
    k_factor: KFactor,
}

impl Configuration {
    pub fn new(k_factor: KFactor, distribution: Distribution) -> Self {
        Self {
            distribution,
            k_factor,
        }
    }

    /// Constant K with the default logistic model
    pub fn with_constant_k(k: f64) -> Result<Self> {
        validate_k(k)?;
        Ok(Self::new(KFactor::Constant(k), Distribution::default()))
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn distribution_mut(&mut self) -> &mut Distribution {
        &mut self.distribution
    }

    pub fn set_distribution(&mut self, distribution: Distribution) {
        self.distribution = distribution;
    }

    pub fn k_factor(&self) -> &KFactor {
        &self.k_factor
    }

    pub fn set_k_factor(&mut self, k_factor: KFactor) {
        self.k_factor = k_factor;
    }

    pub fn k_for(&self, state: &PlayerState) -> f64 {
        self.k_factor.resolve(state)
    }

    /// Probability that a player rated `subject` outscores one rated `opponent`
    pub fn expected_score(&self, subject: Rating, opponent: Rating) -> f64 {
        1.0 - self.distribution.cdf(opponent, subject)
    }

    /// New rating after a series of games against the given opponents
    ///
    /// The player's own K-factor is resolved once from `state` and applied to
    /// the difference between total and expected score.
    pub fn rate_list(
        &self,
        state: &PlayerState,
        opponents: &[Rating],
        scores: &[f64],
    ) -> Result<Rating> {
        if opponents.len() != scores.len() {
            return Err(EloError::ShapeMismatch {
                opponents: opponents.len(),
                scores: scores.len(),
            }
            .into());
        }

        let expected_sum: f64 = opponents
            .iter()
            .map(|opponent| self.expected_score(state.rating, *opponent))
            .sum();
        let score_sum: f64 = scores.iter().sum();

        Ok(state.rating + self.k_for(state) * (score_sum - expected_sum))
    }
}

/// Reference-counted handle to a [`Configuration`]
///
/// Clones share the same configuration. Mutate it during setup; updates in
/// flight read it under a shared lock.
#[derive(Debug, Clone, Default)]
pub struct SharedConfiguration(Arc<RwLock<Configuration>>);

impl SharedConfiguration {
    pub fn new(config: Configuration) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    /// Run `f` against the current configuration
    pub fn read<R>(&self, f: impl FnOnce(&Configuration) -> R) -> Result<R> {
        let guard = self.0.read().map_err(|e| EloError::ConfigurationUnavailable {
            message: e.to_string(),
        })?;
        Ok(f(&guard))
    }

    /// Mutate the configuration for every holder of this handle
    pub fn update<R>(&self, f: impl FnOnce(&mut Configuration) -> R) -> Result<R> {
        let mut guard = self.0.write().map_err(|e| EloError::ConfigurationUnavailable {
            message: e.to_string(),
        })?;
        Ok(f(&mut guard))
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> Result<Configuration> {
        self.read(Configuration::clone)
    }

    pub fn ptr_eq(&self, other: &SharedConfiguration) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Configuration> for SharedConfiguration {
    fn from(config: Configuration) -> Self {
        Self::new(config)
    }
}

fn validate_k(k: f64) -> Result<()> {
    if !(k.is_finite() && k > 0.0) {
        return Err(
            EloError::invalid_parameter("k_factor", format!("must be positive, got {}", k))
                .into(),
        );
    }
    Ok(())
}
