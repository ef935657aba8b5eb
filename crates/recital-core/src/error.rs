//! Configuration error types.
//!
//! The assessment engine itself never fails; these errors cover settings
//! that would make its scores meaningless.

use thiserror::Error;

/// Errors raised when validating an [`AssessmentConfig`](crate::config::AssessmentConfig).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A threshold or weight fell outside [0, 1].
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    /// The partial-match threshold sits above the correct-match threshold.
    #[error("similar_threshold ({similar}) must not exceed correct_threshold ({correct})")]
    ThresholdOrder { similar: f64, correct: f64 },

    /// Score weights do not add up to one.
    #[error("accuracy_weight + completeness_weight must equal 1.0, got {0}")]
    WeightSum(f64),

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {message}")]
    InvalidOverride { var: &'static str, message: String },
}

impl ConfigError {
    pub(crate) fn out_of_range(name: &'static str, value: f64) -> Self {
        Self::OutOfRange { name, value }
    }
}
