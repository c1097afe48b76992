//! Staircase Controller — owns the run and applies one response at a time
//!
//! All decisions are deterministic: the same config and the same response
//! sequence always reproduce the same trajectory, bit for bit.

use crate::completion::{CompletionPolicy, CompletionReason};
use crate::config::StaircaseConfig;
use crate::error::StaircaseResult;
use crate::events::StaircaseEvent;
use crate::reversal::{ReversalRecord, ReversalTracker};
use crate::rule::{Direction, StaircaseRule};
use crate::state::{ResponseRecord, StaircaseState};
use crate::summary::{StaircaseSnapshot, StaircaseSummary};
use crate::threshold::{ThresholdEstimate, ThresholdEstimator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What a single response did to the staircase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The rule fired and the value moved
    Adjusted(Direction),
    /// Threshold not met yet; value unchanged
    Waiting,
    /// The run had already finished; nothing changed
    AlreadyComplete,
}

/// Result of [`StaircaseController::process_response`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseOutcome {
    /// Controlled value for the next stimulus
    pub value: f64,
    pub status: ResponseStatus,
    pub reversal: Option<ReversalRecord>,
    /// Set on the response that finished the run
    pub completed: Option<CompletionReason>,
    /// Events emitted by this call, in order
    pub events: Vec<StaircaseEvent>,
}

impl ResponseOutcome {
    pub fn is_already_complete(&self) -> bool {
        self.status == ResponseStatus::AlreadyComplete
    }
}

/// The adaptive staircase.
///
/// Created by [`StaircaseController::initialize`], mutated only by
/// [`StaircaseController::process_response`], cleared by
/// [`StaircaseController::reset`].
#[derive(Debug, Clone)]
pub struct StaircaseController {
    config: StaircaseConfig,
    rule: StaircaseRule,
    policy: CompletionPolicy,
    current_value: f64,
    response_count: u64,
    consecutive_correct: u32,
    consecutive_incorrect: u32,
    completion: Option<CompletionReason>,
    tracker: ReversalTracker,
    responses: Vec<ResponseRecord>,
    pending_events: Vec<StaircaseEvent>,
}

impl StaircaseController {
    /// Validate `config` and start a fresh run
    pub fn initialize(config: StaircaseConfig) -> StaircaseResult<Self> {
        config.validate()?;

        let mut controller = Self {
            rule: config.rule(),
            policy: CompletionPolicy::from_config(&config),
            current_value: config.initial_value,
            response_count: 0,
            consecutive_correct: 0,
            consecutive_incorrect: 0,
            completion: None,
            tracker: ReversalTracker::new(
                config.initial_step,
                config.final_step,
                config.reversals_per_step_decay,
            ),
            responses: Vec::new(),
            pending_events: Vec::new(),
            config,
        };
        controller.announce();
        Ok(controller)
    }

    /// Discard all progress and history, keeping the config
    pub fn reset(&mut self) {
        self.current_value = self.config.initial_value;
        self.response_count = 0;
        self.consecutive_correct = 0;
        self.consecutive_incorrect = 0;
        self.completion = None;
        self.tracker = ReversalTracker::new(
            self.config.initial_step,
            self.config.final_step,
            self.config.reversals_per_step_decay,
        );
        self.responses.clear();
        self.pending_events.clear();
        self.announce();
    }

    fn announce(&mut self) {
        info!(
            rule = %self.rule.name,
            initial = self.config.initial_value,
            step = self.config.initial_step,
            max_responses = self.policy.max_responses,
            "Staircase initialized"
        );
        self.pending_events.push(StaircaseEvent::Initialized {
            rule: self.rule.name,
            initial_value: self.config.initial_value,
            initial_step: self.config.initial_step,
        });
    }

    /// Apply one subject response and return the value for the next stimulus
    pub fn process_response(&mut self, correct: bool) -> ResponseOutcome {
        if self.completion.is_some() {
            warn!(
                responses = self.response_count,
                "Response ignored: staircase is already complete"
            );
            let event = StaircaseEvent::AlreadyComplete {
                value: self.current_value,
                responses: self.response_count,
            };
            return ResponseOutcome {
                value: self.current_value,
                status: ResponseStatus::AlreadyComplete,
                reversal: None,
                completed: None,
                events: vec![event],
            };
        }

        let value_shown = self.current_value;
        let response_index = self.response_count;
        self.responses.push(ResponseRecord {
            response_index,
            value_shown,
            correct,
        });
        self.response_count += 1;

        if correct {
            self.consecutive_correct += 1;
            self.consecutive_incorrect = 0;
        } else {
            self.consecutive_incorrect += 1;
            self.consecutive_correct = 0;
        }

        let direction = self
            .rule
            .decide(self.consecutive_correct, self.consecutive_incorrect);

        let mut next_value = self.current_value;
        let mut reversal = None;
        let mut step_decay = None;

        if let Some(direction) = direction {
            next_value += direction.sign() * self.tracker.current_step();
            self.consecutive_correct = 0;
            self.consecutive_incorrect = 0;

            let logged = self.clamp(next_value);
            let update = self.tracker.record(direction, self.response_count, logged);
            reversal = update.reversal;
            step_decay = update.step_decay;

            if let Some(record) = reversal {
                debug!(
                    reversal = record.reversal_index,
                    response = record.response_index,
                    value = record.value,
                    "Reversal detected"
                );
            }
            if let Some((old, new)) = step_decay {
                debug!(old_step = old, new_step = new, "Step size reduced");
            }
        }

        self.completion = self.policy.evaluate(self.response_count, &self.tracker);
        self.current_value = self.clamp(next_value);

        debug!(
            response = self.response_count,
            correct,
            shown = value_shown,
            next = self.current_value,
            step = self.tracker.current_step(),
            reversals = self.tracker.reversal_count(),
            "Response processed"
        );

        let mut events = vec![StaircaseEvent::ResponseProcessed {
            response_index,
            correct,
            value_shown,
            direction,
            next_value: self.current_value,
        }];
        if let Some(record) = reversal {
            events.push(StaircaseEvent::ReversalDetected {
                reversal_index: record.reversal_index,
                response_index: record.response_index,
                value: record.value,
            });
            if let Some((old_step, new_step)) = step_decay {
                events.push(StaircaseEvent::StepDecayed {
                    reversal_index: record.reversal_index,
                    old_step,
                    new_step,
                });
            }
        }
        if let Some(reason) = self.completion {
            let threshold = self.estimated_threshold();
            info!(
                %reason,
                threshold,
                state = %self.state().summary(),
                "Staircase complete"
            );
            events.push(StaircaseEvent::Completed {
                reason,
                responses: self.response_count,
                reversals: self.tracker.reversal_count(),
                threshold,
            });
        }
        self.pending_events.extend(events.iter().cloned());

        ResponseOutcome {
            value: self.current_value,
            status: match direction {
                Some(direction) => ResponseStatus::Adjusted(direction),
                None => ResponseStatus::Waiting,
            },
            reversal,
            completed: self.completion,
            events,
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.config.min_value, self.config.max_value)
    }

    pub fn config(&self) -> &StaircaseConfig {
        &self.config
    }

    pub fn rule(&self) -> StaircaseRule {
        self.rule
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn current_step(&self) -> f64 {
        self.tracker.current_step()
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion
    }

    pub fn response_count(&self) -> u64 {
        self.response_count
    }

    /// Responses expressed in trial units
    pub fn trials_completed(&self) -> u64 {
        self.policy.trials_completed(self.response_count)
    }

    pub fn reversal_count(&self) -> u32 {
        self.tracker.reversal_count()
    }

    /// Threshold point estimate, recomputed on every call
    pub fn estimated_threshold(&self) -> f64 {
        self.threshold_estimate().value
    }

    pub fn threshold_estimate(&self) -> ThresholdEstimate {
        ThresholdEstimator::estimate(self.tracker.reversals(), self.current_value)
    }

    pub fn state(&self) -> StaircaseState {
        StaircaseState {
            current_value: self.current_value,
            current_step: self.tracker.current_step(),
            response_count: self.response_count,
            reversal_count: self.tracker.reversal_count(),
            consecutive_correct: self.consecutive_correct,
            consecutive_incorrect: self.consecutive_incorrect,
            last_direction: self.tracker.last_direction(),
            is_complete: self.is_complete(),
            completion_reason: self.completion,
        }
    }

    /// Response log, oldest first
    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// Reversal log, oldest first
    pub fn reversals(&self) -> &[ReversalRecord] {
        self.tracker.reversals()
    }

    /// Values shown, one per response
    pub fn value_history(&self) -> impl Iterator<Item = f64> + '_ {
        self.responses.iter().map(|r| r.value_shown)
    }

    /// Correctness, one per response
    pub fn correctness_history(&self) -> impl Iterator<Item = bool> + '_ {
        self.responses.iter().map(|r| r.correct)
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<StaircaseEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn summary(&self) -> StaircaseSummary {
        StaircaseSummary::from_controller(self)
    }

    pub fn snapshot(&self) -> StaircaseSnapshot {
        StaircaseSnapshot::from_controller(self)
    }
}
