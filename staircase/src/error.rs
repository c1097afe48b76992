//! Staircase error types
//!
//! Configuration problems are rejected up front at `initialize`. Running a
//! staircase never fails: a response after completion is reported through
//! the outcome, not as an error.

use thiserror::Error;

/// Result type alias for staircase operations
pub type StaircaseResult<T> = Result<T, StaircaseError>;

/// Reasons a [`StaircaseConfig`](crate::StaircaseConfig) is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min_value` must be strictly below `max_value`
    #[error("Invalid value range: min {min} must be below max {max}")]
    InvalidRange { min: f64, max: f64 },

    /// The starting value must lie strictly inside the range
    #[error("Initial value {initial} must lie strictly between {min} and {max}")]
    InitialOutOfRange { initial: f64, min: f64, max: f64 },

    /// Steps must satisfy `initial_step >= final_step > 0`
    #[error("Invalid step sizes: initial {initial} must be >= final {final_step} and final must be > 0")]
    InvalidStep { initial: f64, final_step: f64 },

    /// Step decay interval must be at least one reversal
    #[error("reversals_per_step_decay must be >= 1 (got {0})")]
    InvalidDecayInterval(u32),

    /// At least one reversal is required before reversal-based stopping
    #[error("min_reversals must be >= 1 (got {0})")]
    InvalidMinReversals(u32),

    /// The counting-unit multiplier must be positive
    #[error("responses_per_trial must be >= 1 (got {0})")]
    InvalidResponsesPerTrial(u32),

    /// A numeric field is NaN or infinite
    #[error("Field {field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    /// TOML source could not be parsed into a config
    #[error("Invalid staircase config TOML: {0}")]
    Parse(String),
}

/// Errors raised by the staircase controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StaircaseError {
    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps_into_staircase_error() {
        let err: StaircaseError = ConfigError::InvalidMinReversals(0).into();
        assert!(matches!(
            err,
            StaircaseError::Configuration(ConfigError::InvalidMinReversals(0))
        ));
        assert!(err.to_string().contains("min_reversals"));
    }

    #[test]
    fn test_range_error_message() {
        let err = ConfigError::InvalidRange { min: 2.0, max: 1.0 };
        assert_eq!(
            err.to_string(),
            "Invalid value range: min 2 must be below max 1"
        );
    }
}
