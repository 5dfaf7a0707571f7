//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum EloError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Number of opponents ({opponents}) does not equal number of scores ({scores})")]
    ShapeMismatch { opponents: usize, scores: usize },

    #[error("Match {match_id} has already been applied")]
    MatchAlreadyApplied { match_id: String },

    #[error("Configuration unavailable: {message}")]
    ConfigurationUnavailable { message: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl EloError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        EloError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
