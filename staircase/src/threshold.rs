//! Threshold Estimator — mean of the most recent reversal values

use crate::reversal::ReversalRecord;
use serde::{Deserialize, Serialize};

/// Reversals required before the estimate stops being provisional
pub const MIN_REVERSALS_FOR_ESTIMATE: usize = 4;

/// Maximum number of trailing reversals averaged
pub const REVERSALS_AVERAGED: usize = 6;

/// Point estimate of the perceptual threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEstimate {
    pub value: f64,
    /// Reversal values that went into the mean (0 when provisional)
    pub reversals_used: usize,
    /// True while too few reversals exist; `value` is then the current value
    pub provisional: bool,
}

/// Stateless estimator; recomputes from the reversal log on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdEstimator;

impl ThresholdEstimator {
    pub fn estimate(reversals: &[ReversalRecord], current_value: f64) -> ThresholdEstimate {
        if reversals.len() < MIN_REVERSALS_FOR_ESTIMATE {
            return ThresholdEstimate {
                value: current_value,
                reversals_used: 0,
                provisional: true,
            };
        }

        let used = REVERSALS_AVERAGED.min(reversals.len());
        let tail = &reversals[reversals.len() - used..];
        let sum: f64 = tail.iter().map(|r| r.value).sum();

        ThresholdEstimate {
            value: sum / used as f64,
            reversals_used: used,
            provisional: false,
        }
    }
}
