//! Reversal Tracker — direction-change detection and step decay

use crate::rule::Direction;
use serde::{Deserialize, Serialize};

/// One recorded reversal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReversalRecord {
    /// Which reversal this was (1-indexed)
    pub reversal_index: u32,
    /// Response count when it happened (1-indexed)
    pub response_index: u64,
    /// Controlled value after the adjustment, clamped into range
    pub value: f64,
}

/// Result of feeding one applied direction into the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReversalUpdate {
    /// Set when this direction counted as a reversal
    pub reversal: Option<ReversalRecord>,
    /// `(old, new)` step when this reversal triggered a decay
    pub step_decay: Option<(f64, f64)>,
}

/// Tracks the last applied direction, the reversal log and the step size.
///
/// The first direction ever applied counts as reversal #1; after that only a
/// change of direction does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReversalTracker {
    last_direction: Option<Direction>,
    reversals: Vec<ReversalRecord>,
    current_step: f64,
    final_step: f64,
    reversals_per_step_decay: u32,
}

impl ReversalTracker {
    pub fn new(initial_step: f64, final_step: f64, reversals_per_step_decay: u32) -> Self {
        debug_assert!(reversals_per_step_decay >= 1, "decay interval must be validated");
        Self {
            last_direction: None,
            reversals: Vec::new(),
            current_step: initial_step,
            final_step,
            reversals_per_step_decay,
        }
    }

    /// Whether `direction` would count as a reversal
    pub fn is_reversal(&self, direction: Direction) -> bool {
        self.last_direction != Some(direction)
    }

    /// Record an applied direction.
    ///
    /// `value` is the post-adjustment value to log if this is a reversal.
    pub fn record(&mut self, direction: Direction, response_index: u64, value: f64) -> ReversalUpdate {
        let reversed = self.is_reversal(direction);
        self.last_direction = Some(direction);

        if !reversed {
            return ReversalUpdate {
                reversal: None,
                step_decay: None,
            };
        }

        let record = ReversalRecord {
            reversal_index: self.reversal_count() + 1,
            response_index,
            value,
        };
        self.reversals.push(record);

        let step_decay = if record.reversal_index % self.reversals_per_step_decay == 0 {
            let old = self.current_step;
            self.current_step = self.final_step.max(old * 0.5);
            // A step already at the floor is not a decay
            (self.current_step < old).then_some((old, self.current_step))
        } else {
            None
        };

        ReversalUpdate {
            reversal: Some(record),
            step_decay,
        }
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn current_step(&self) -> f64 {
        self.current_step
    }

    pub fn reversal_count(&self) -> u32 {
        self.reversals.len() as u32
    }

    pub fn reversals(&self) -> &[ReversalRecord] {
        &self.reversals
    }

    /// Reversal with the given 1-based index
    pub fn nth(&self, reversal_index: u32) -> Option<&ReversalRecord> {
        let idx = reversal_index.checked_sub(1)?;
        self.reversals.get(idx as usize)
    }
}
