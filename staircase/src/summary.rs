//! End-of-run summary and export snapshot
//!
//! Both are read-only copies built from the controller's logs; the engine
//! hands them to an external recorder and never writes them anywhere itself.

use crate::config::StaircaseConfig;
use crate::controller::StaircaseController;
use crate::reversal::ReversalRecord;
use crate::rule::RuleName;
use crate::state::{ResponseRecord, StaircaseState};
use crate::threshold::ThresholdEstimate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline statistics for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaircaseSummary {
    pub rule: RuleName,
    pub responses: u64,
    pub trials_completed: u64,
    pub reversals: u32,
    pub final_value: f64,
    pub final_step: f64,
    pub threshold: ThresholdEstimate,
    /// Percent correct; `None` before any response
    pub accuracy_percent: Option<f64>,
    pub reversal_values: Vec<f64>,
    pub complete: bool,
}

impl StaircaseSummary {
    pub fn from_controller(controller: &StaircaseController) -> Self {
        let responses = controller.responses();
        let accuracy_percent = if responses.is_empty() {
            None
        } else {
            let correct = responses.iter().filter(|r| r.correct).count();
            Some(correct as f64 / responses.len() as f64 * 100.0)
        };

        Self {
            rule: controller.rule().name,
            responses: controller.response_count(),
            trials_completed: controller.trials_completed(),
            reversals: controller.reversal_count(),
            final_value: controller.current_value(),
            final_step: controller.current_step(),
            threshold: controller.threshold_estimate(),
            accuracy_percent,
            reversal_values: controller.reversals().iter().map(|r| r.value).collect(),
            complete: controller.is_complete(),
        }
    }
}

impl fmt::Display for StaircaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== STAIRCASE SUMMARY ===")?;
        writeln!(f, "Rule: {}", self.rule)?;
        writeln!(
            f,
            "Responses: {} ({} trials)",
            self.responses, self.trials_completed
        )?;
        writeln!(f, "Reversals: {}", self.reversals)?;
        writeln!(f, "Final value: {:.3}", self.final_value)?;
        writeln!(f, "Final step: {:.3}", self.final_step)?;
        write!(f, "Estimated threshold: {:.3}", self.threshold.value)?;
        if self.threshold.provisional {
            write!(f, " (provisional)")?;
        }
        writeln!(f)?;
        if let Some(accuracy) = self.accuracy_percent {
            writeln!(f, "Overall accuracy: {:.1}%", accuracy)?;
        }
        let values: Vec<String> = self
            .reversal_values
            .iter()
            .map(|v| format!("{:.3}", v))
            .collect();
        write!(f, "Reversal values: {}", values.join(", "))
    }
}

/// Everything a recorder needs to export one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaircaseSnapshot {
    pub config: StaircaseConfig,
    pub state: StaircaseState,
    pub responses: Vec<ResponseRecord>,
    pub reversals: Vec<ReversalRecord>,
}

impl StaircaseSnapshot {
    pub fn from_controller(controller: &StaircaseController) -> Self {
        Self {
            config: controller.config().clone(),
            state: controller.state(),
            responses: controller.responses().to_vec(),
            reversals: controller.reversals().to_vec(),
        }
    }

    /// Values shown, one per response
    pub fn value_history(&self) -> Vec<f64> {
        self.responses.iter().map(|r| r.value_shown).collect()
    }

    /// Correctness, one per response
    pub fn correctness_history(&self) -> Vec<bool> {
        self.responses.iter().map(|r| r.correct).collect()
    }
}
