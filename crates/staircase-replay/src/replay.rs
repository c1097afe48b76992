//! Replay a recorded correctness sequence through a fresh staircase.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use staircase::{StaircaseConfig, StaircaseController, StaircaseEvent, StaircaseSnapshot, StaircaseSummary};
use tracing::{debug, info, warn};

/// Everything the replay tool reports for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub generated_at: DateTime<Utc>,
    pub summary: StaircaseSummary,
    pub snapshot: StaircaseSnapshot,
    /// Responses supplied but ignored because the run had already completed
    pub ignored_responses: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<StaircaseEvent>,
}

/// Replay `responses` until they run out or the staircase completes.
pub fn replay(
    config: StaircaseConfig,
    responses: &[bool],
    include_events: bool,
) -> Result<ReplayReport> {
    let mut staircase =
        StaircaseController::initialize(config).context("Failed to initialize staircase")?;

    let mut consumed = 0;
    for &correct in responses {
        if staircase.is_complete() {
            break;
        }
        let outcome = staircase.process_response(correct);
        consumed += 1;
        debug!(
            response = consumed,
            correct,
            next = outcome.value,
            "Replayed response"
        );
    }

    let ignored_responses = responses.len() - consumed;
    if ignored_responses > 0 {
        warn!(
            ignored = ignored_responses,
            "Staircase completed before the response sequence ended"
        );
    }

    let summary = staircase.summary();
    info!(
        responses = summary.responses,
        reversals = summary.reversals,
        threshold = summary.threshold.value,
        complete = summary.complete,
        "Replay finished"
    );

    let events = if include_events {
        staircase.drain_events()
    } else {
        Vec::new()
    };

    Ok(ReplayReport {
        generated_at: Utc::now(),
        summary,
        snapshot: staircase.snapshot(),
        ignored_responses,
        events,
    })
}
