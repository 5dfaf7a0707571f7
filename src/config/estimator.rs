//! Estimator configuration

use crate::estimation::{validate_percentile, DEFAULT_PERCENTILE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Confidence level used when no percentile is given
    pub percentile: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
        }
    }
}

impl EstimatorSettings {
    pub fn validate(&self) -> crate::error::Result<()> {
        validate_percentile(self.percentile)
    }
}
