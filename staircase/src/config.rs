//! Staircase configuration, presets and validation

use crate::error::ConfigError;
use crate::rule::{DirectionSemantics, RuleName, StaircaseRule};
use serde::{Deserialize, Serialize};

/// Full parameter set for one staircase run.
///
/// Fields map one-to-one onto the TOML form accepted by
/// [`StaircaseConfig::from_toml_str`]:
///
/// ```toml
/// rule = "two_up_one_down"
/// direction = "increase_is_harder"
/// initial_value = 0.1
/// min_value = 0.05
/// max_value = 2.0
/// initial_step = 0.01
/// final_step = 0.001
/// reversals_per_step_decay = 4
/// max_trials = 60
/// responses_per_trial = 1
/// min_reversals = 8
/// responses_after_min_reversals = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaircaseConfig {
    pub rule: RuleName,
    #[serde(default)]
    pub direction: DirectionSemantics,
    pub initial_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub initial_step: f64,
    /// Floor for step decay; equal to `initial_step` disables decay
    pub final_step: f64,
    /// Halve the step every this many reversals
    pub reversals_per_step_decay: u32,
    /// Response cap expressed in trials
    pub max_trials: u32,
    /// How many responses make up one trial
    #[serde(default = "default_responses_per_trial")]
    pub responses_per_trial: u32,
    pub min_reversals: u32,
    pub responses_after_min_reversals: u32,
    /// When false only the response cap ends the run
    #[serde(default = "default_stop_on_reversals")]
    pub stop_on_reversals: bool,
}

fn default_responses_per_trial() -> u32 {
    1
}

fn default_stop_on_reversals() -> bool {
    true
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self::intensity_preset()
    }
}

impl StaircaseConfig {
    /// Gradual spacing/eccentricity staircase (larger = harder)
    pub fn intensity_preset() -> Self {
        Self {
            rule: RuleName::TwoUpOneDown,
            direction: DirectionSemantics::IncreaseIsHarder,
            initial_value: 0.1,
            min_value: 0.05,
            max_value: 2.0,
            initial_step: 0.01,
            final_step: 0.001,
            reversals_per_step_decay: 4,
            max_trials: 60,
            responses_per_trial: 1,
            min_reversals: 8,
            responses_after_min_reversals: 10,
            stop_on_reversals: true,
        }
    }

    /// Per-stimulus stimulus-duration staircase in seconds (larger = easier).
    ///
    /// Runs for 120 trials of 5 stimuli each with a constant 30 ms step.
    pub fn duration_preset() -> Self {
        Self {
            rule: RuleName::TwoUpTwoDown,
            direction: DirectionSemantics::IncreaseIsEasier,
            initial_value: 0.600,
            min_value: 0.01667,
            max_value: 1.2,
            initial_step: 0.030,
            final_step: 0.030,
            reversals_per_step_decay: 4,
            max_trials: 120,
            responses_per_trial: 5,
            min_reversals: 8,
            responses_after_min_reversals: 10,
            stop_on_reversals: false,
        }
    }

    /// Look up a preset by name (`intensity` or `duration`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "intensity" => Some(Self::intensity_preset()),
            "duration" => Some(Self::duration_preset()),
            _ => None,
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Total response cap (`max_trials × responses_per_trial`)
    pub fn max_responses(&self) -> u64 {
        u64::from(self.max_trials) * u64::from(self.responses_per_trial)
    }

    /// Resolve the rule descriptor
    pub fn rule(&self) -> StaircaseRule {
        StaircaseRule::new(self.rule, self.direction)
    }

    /// Check every precondition the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numeric = [
            ("initial_value", self.initial_value),
            ("min_value", self.min_value),
            ("max_value", self.max_value),
            ("initial_step", self.initial_step),
            ("final_step", self.final_step),
        ];
        if let Some((field, value)) = numeric.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field, value });
        }

        if self.min_value >= self.max_value {
            return Err(ConfigError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.initial_value <= self.min_value || self.initial_value >= self.max_value {
            return Err(ConfigError::InitialOutOfRange {
                initial: self.initial_value,
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.final_step <= 0.0 || self.initial_step < self.final_step {
            return Err(ConfigError::InvalidStep {
                initial: self.initial_step,
                final_step: self.final_step,
            });
        }
        if self.reversals_per_step_decay == 0 {
            return Err(ConfigError::InvalidDecayInterval(
                self.reversals_per_step_decay,
            ));
        }
        if self.min_reversals == 0 {
            return Err(ConfigError::InvalidMinReversals(self.min_reversals));
        }
        if self.responses_per_trial == 0 {
            return Err(ConfigError::InvalidResponsesPerTrial(
                self.responses_per_trial,
            ));
        }
        Ok(())
    }
}
