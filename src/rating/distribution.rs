//! Probability models mapping a rating difference to an expected score
//!
//! A [`Distribution`] is a cumulative distribution function centred on a
//! player's rating. Evaluating it at an opponent's rating gives the
//! probability that the opponent's performance falls below the sampled
//! threshold, and its inverse recovers a rating difference from a score.

use crate::error::{EloError, Result};
use serde::{Deserialize, Serialize};
use statrs::function::erf::{erf, erf_inv};
use std::f64::consts::SQRT_2;

pub const DEFAULT_LOGISTIC_BASE: f64 = 10.0;
pub const DEFAULT_LOGISTIC_SCALE: f64 = 400.0;
pub const DEFAULT_NORMAL_STDEV: f64 = 400.0 / SQRT_2;

/// Logistic curve `1 / (1 + base^(-(x - mean) / scale))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Logistic {
    base: f64,
    scale: f64,
}

impl Logistic {
    pub fn new(base: f64, scale: f64) -> Result<Self> {
        validate_base(base)?;
        validate_positive("scale", scale)?;
        Ok(Self { base, scale })
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_base(&mut self, base: f64) -> Result<()> {
        validate_base(base)?;
        self.base = base;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        validate_positive("scale", scale)?;
        self.scale = scale;
        Ok(())
    }

    pub fn cdf(&self, x: f64, mean: f64) -> f64 {
        let z = self.base.ln() * (x - mean) / self.scale;
        // Branch on the sign so exp() only ever sees a non-positive argument.
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let e = z.exp();
            e / (1.0 + e)
        }
    }

    pub fn quantile(&self, p: f64, mean: f64) -> f64 {
        if p <= 0.0 {
            return f64::NEG_INFINITY;
        }
        if p >= 1.0 {
            return f64::INFINITY;
        }
        mean + self.scale * (p / (1.0 - p)).ln() / self.base.ln()
    }

    fn validate(&self) -> Result<()> {
        validate_base(self.base)?;
        validate_positive("scale", self.scale)
    }
}

impl Default for Logistic {
    fn default() -> Self {
        Self {
            base: DEFAULT_LOGISTIC_BASE,
            scale: DEFAULT_LOGISTIC_SCALE,
        }
    }
}

/// Normal curve with the given standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normal {
    stdev: f64,
}

impl Normal {
    pub fn new(stdev: f64) -> Result<Self> {
        validate_positive("stdev", stdev)?;
        Ok(Self { stdev })
    }

    pub fn stdev(&self) -> f64 {
        self.stdev
    }

    pub fn set_stdev(&mut self, stdev: f64) -> Result<()> {
        validate_positive("stdev", stdev)?;
        self.stdev = stdev;
        Ok(())
    }

    pub fn cdf(&self, x: f64, mean: f64) -> f64 {
        (1.0 + erf((x - mean) / (self.stdev * SQRT_2))) / 2.0
    }

    pub fn quantile(&self, p: f64, mean: f64) -> f64 {
        if p <= 0.0 {
            return f64::NEG_INFINITY;
        }
        if p >= 1.0 {
            return f64::INFINITY;
        }
        mean + self.stdev * SQRT_2 * erf_inv(2.0 * p - 1.0)
    }

    fn validate(&self) -> Result<()> {
        validate_positive("stdev", self.stdev)
    }
}

impl Default for Normal {
    fn default() -> Self {
        Self {
            stdev: DEFAULT_NORMAL_STDEV,
        }
    }
}

/// Probability model used for expected scores and rating difference estimates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Distribution {
    Logistic(Logistic),
    Normal(Normal),
}

impl Distribution {
    /// Logistic model, `logistic(10.0, 400.0)` is classic Elo
    pub fn logistic(base: f64, scale: f64) -> Result<Self> {
        Ok(Distribution::Logistic(Logistic::new(base, scale)?))
    }

    pub fn normal(stdev: f64) -> Result<Self> {
        Ok(Distribution::Normal(Normal::new(stdev)?))
    }

    /// Cumulative probability at `x` for the curve centred on `mean`
    ///
    /// Always within `[0, 1]`, strictly inside it for moderate `x - mean`,
    /// and exactly 0.5 when `x == mean`.
    pub fn cdf(&self, x: f64, mean: f64) -> f64 {
        match self {
            Distribution::Logistic(logistic) => logistic.cdf(x, mean),
            Distribution::Normal(normal) => normal.cdf(x, mean),
        }
    }

    /// Inverse of [`Distribution::cdf`]: the `x` with `cdf(x, mean) == p`
    ///
    /// Returns negative infinity for `p <= 0` and positive infinity for
    /// `p >= 1`.
    pub fn quantile(&self, p: f64, mean: f64) -> f64 {
        match self {
            Distribution::Logistic(logistic) => logistic.quantile(p, mean),
            Distribution::Normal(normal) => normal.quantile(p, mean),
        }
    }

    /// Check parameters, mainly for values that came in through serde
    pub fn validate(&self) -> Result<()> {
        match self {
            Distribution::Logistic(logistic) => logistic.validate(),
            Distribution::Normal(normal) => normal.validate(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Logistic(_) => "logistic",
            Distribution::Normal(_) => "normal",
        }
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Distribution::Logistic(Logistic::default())
    }
}

impl From<Logistic> for Distribution {
    fn from(logistic: Logistic) -> Self {
        Distribution::Logistic(logistic)
    }
}

impl From<Normal> for Distribution {
    fn from(normal: Normal) -> Self {
        Distribution::Normal(normal)
    }
}

fn validate_positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(
            EloError::invalid_parameter(name, format!("must be positive, got {}", value)).into(),
        );
    }
    Ok(())
}

fn validate_base(base: f64) -> Result<()> {
    if !(base.is_finite() && base > 1.0) {
        return Err(EloError::invalid_parameter(
            "base",
            format!("must be greater than 1, got {}", base),
        )
        .into());
    }
    Ok(())
}
