//! Completion Policy — decides when a run terminates

use crate::config::StaircaseConfig;
use crate::reversal::ReversalTracker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stopping criterion fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// The response cap was reached
    MaxResponses { responses: u64 },
    /// Enough responses followed the `min_reversals`-th reversal
    ReversalsSettled {
        reversals: u32,
        responses_since_settling: u64,
    },
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxResponses { responses } => {
                write!(f, "response cap reached after {} responses", responses)
            }
            Self::ReversalsSettled {
                reversals,
                responses_since_settling,
            } => write!(
                f,
                "{} reversals with {} responses since the settling reversal",
                reversals, responses_since_settling
            ),
        }
    }
}

/// Stopping rule derived from the config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionPolicy {
    pub max_responses: u64,
    pub responses_per_trial: u32,
    pub min_reversals: u32,
    pub responses_after_min_reversals: u32,
    pub stop_on_reversals: bool,
}

impl CompletionPolicy {
    pub fn from_config(config: &StaircaseConfig) -> Self {
        debug_assert!(config.responses_per_trial >= 1, "responses_per_trial must be validated");
        Self {
            max_responses: config.max_responses(),
            responses_per_trial: config.responses_per_trial,
            min_reversals: config.min_reversals,
            responses_after_min_reversals: config.responses_after_min_reversals,
            stop_on_reversals: config.stop_on_reversals,
        }
    }

    /// Evaluate both criteria; the response cap wins when both hold
    pub fn evaluate(&self, response_count: u64, reversals: &ReversalTracker) -> Option<CompletionReason> {
        if response_count >= self.max_responses {
            return Some(CompletionReason::MaxResponses {
                responses: response_count,
            });
        }

        if !self.stop_on_reversals || reversals.reversal_count() < self.min_reversals {
            return None;
        }

        let settling = reversals.nth(self.min_reversals)?;
        let since = response_count.saturating_sub(settling.response_index);
        (since >= u64::from(self.responses_after_min_reversals)).then_some(
            CompletionReason::ReversalsSettled {
                reversals: reversals.reversal_count(),
                responses_since_settling: since,
            },
        )
    }

    /// Responses converted to whole trials
    pub fn trials_completed(&self, response_count: u64) -> u64 {
        response_count / u64::from(self.responses_per_trial)
    }
}
