//! Staircase State — per-response records and the state snapshot

use crate::completion::CompletionReason;
use crate::rule::Direction;
use serde::{Deserialize, Serialize};

/// One processed response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Zero-based position in the response log
    pub response_index: u64,
    /// Value in effect when the stimulus was shown (before adjustment)
    pub value_shown: f64,
    pub correct: bool,
}

/// Point-in-time copy of the controller's mutable state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaircaseState {
    pub current_value: f64,
    pub current_step: f64,
    pub response_count: u64,
    pub reversal_count: u32,
    pub consecutive_correct: u32,
    pub consecutive_incorrect: u32,
    /// Unset until the first direction is applied
    pub last_direction: Option<Direction>,
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_reason: Option<CompletionReason>,
}

impl StaircaseState {
    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "value={:.4} step={:.4} responses={} reversals={} complete={}",
            self.current_value,
            self.current_step,
            self.response_count,
            self.reversal_count,
            self.is_complete,
        )
    }
}
