//! Staircase replay tool
//!
//! Feeds a recorded correctness sequence through the staircase engine and
//! reports the resulting trajectory, reversals and threshold estimate. Used
//! to re-derive session results from raw response logs and to sanity-check
//! a config before running it with a subject.

pub mod replay;
pub mod responses;
pub mod source;

pub use replay::{replay, ReplayReport};
pub use responses::{parse_responses, ResponseParseError};
pub use source::{load_config, load_responses};
