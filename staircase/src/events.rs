//! Structured staircase events
//!
//! The controller never writes output itself. Each call to
//! `process_response` yields the events below, which an external logger or
//! recorder can serialize (`{"type": "reversal_detected", ...}`) or inspect.
//! `AlreadyComplete` is only returned with the call's outcome; it never
//! enters the buffer behind `drain_events`.

use crate::completion::CompletionReason;
use crate::rule::{Direction, RuleName};
use serde::{Deserialize, Serialize};

/// Everything observable that happens inside a staircase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StaircaseEvent {
    /// The controller was (re)initialized
    Initialized {
        rule: RuleName,
        initial_value: f64,
        initial_step: f64,
    },

    /// A response was applied
    ResponseProcessed {
        response_index: u64,
        correct: bool,
        value_shown: f64,
        /// `None` while the rule is still waiting for more responses
        direction: Option<Direction>,
        next_value: f64,
    },

    /// The applied direction counted as a reversal
    ReversalDetected {
        reversal_index: u32,
        response_index: u64,
        value: f64,
    },

    /// The step size was halved
    StepDecayed {
        reversal_index: u32,
        old_step: f64,
        new_step: f64,
    },

    /// The completion policy fired
    Completed {
        reason: CompletionReason,
        responses: u64,
        reversals: u32,
        threshold: f64,
    },

    /// A response arrived after completion and was ignored
    AlreadyComplete { value: f64, responses: u64 },
}

impl StaircaseEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            StaircaseEvent::Initialized { .. } => "initialized",
            StaircaseEvent::ResponseProcessed { .. } => "response_processed",
            StaircaseEvent::ReversalDetected { .. } => "reversal_detected",
            StaircaseEvent::StepDecayed { .. } => "step_decayed",
            StaircaseEvent::Completed { .. } => "completed",
            StaircaseEvent::AlreadyComplete { .. } => "already_complete",
        }
    }
}
