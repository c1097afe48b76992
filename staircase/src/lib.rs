//! Adaptive Staircase Engine
//!
//! Deterministic n-up/m-down staircase for psychophysical threshold
//! estimation. The experiment driver feeds one correctness boolean per
//! subject response and reads back the controlled value (intensity,
//! duration, ...) for the next stimulus.
//!
//! # Components
//!
//! ```text
//! driver ──process_response(correct)──▶ StaircaseController
//!                                          │
//!                                          ├─ StaircaseRule      (n-up/m-down → direction)
//!                                          ├─ ReversalTracker    (reversals, step decay)
//!                                          ├─ CompletionPolicy   (response cap, settled reversals)
//!                                          └─ ThresholdEstimator (mean of last reversals)
//! ```
//!
//! The engine does no I/O. Observability goes through [`StaircaseEvent`]s
//! returned from every call and `tracing` records at debug/info level.
//!
//! # Usage
//!
//! ```
//! use staircase::{StaircaseConfig, StaircaseController};
//!
//! let mut staircase = StaircaseController::initialize(StaircaseConfig::intensity_preset())?;
//! while !staircase.is_complete() {
//!     let correct = staircase.response_count() % 3 != 0;
//!     staircase.process_response(correct);
//! }
//! println!("threshold ≈ {:.3}", staircase.estimated_threshold());
//! # Ok::<(), staircase::StaircaseError>(())
//! ```

pub mod completion;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod reversal;
pub mod rule;
pub mod state;
pub mod summary;
pub mod threshold;

pub use completion::{CompletionPolicy, CompletionReason};
pub use config::StaircaseConfig;
pub use controller::{ResponseOutcome, ResponseStatus, StaircaseController};
pub use error::{ConfigError, StaircaseError, StaircaseResult};
pub use events::StaircaseEvent;
pub use reversal::{ReversalRecord, ReversalTracker, ReversalUpdate};
pub use rule::{Direction, DirectionSemantics, RuleName, StaircaseRule, UnknownRule};
pub use state::{ResponseRecord, StaircaseState};
pub use summary::{StaircaseSnapshot, StaircaseSummary};
pub use threshold::{ThresholdEstimate, ThresholdEstimator};
