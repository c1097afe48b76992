//! Staircase Rule — n-up/m-down decision table
//!
//! A rule is plain data: how many consecutive correct responses make the task
//! harder (`n_up`), how many consecutive incorrect responses make it easier
//! (`m_down`), and which way "harder" moves the controlled value. Adding a
//! procedure means adding a row to [`RuleName::thresholds`], not a new code
//! path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named n-up/m-down procedures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    /// 1-up, 1-down (50%)
    SimpleUpDown,
    /// 2-up, 1-down (70.7%)
    TwoUpOneDown,
    /// 3-up, 1-down (79.4%)
    ThreeUpOneDown,
    /// 1-up, 2-down (70.7%)
    OneUpTwoDown,
    /// 1-up, 3-down (79.4%)
    OneUpThreeDown,
    /// 2-up, 2-down (70.7%, symmetric)
    TwoUpTwoDown,
}

impl RuleName {
    /// Every known procedure, in table order
    pub const ALL: [RuleName; 6] = [
        Self::SimpleUpDown,
        Self::TwoUpOneDown,
        Self::ThreeUpOneDown,
        Self::OneUpTwoDown,
        Self::OneUpThreeDown,
        Self::TwoUpTwoDown,
    ];

    /// `(n_up, m_down)` for this procedure
    pub fn thresholds(&self) -> (u32, u32) {
        match self {
            Self::SimpleUpDown => (1, 1),
            Self::TwoUpOneDown => (2, 1),
            Self::ThreeUpOneDown => (3, 1),
            Self::OneUpTwoDown => (1, 2),
            Self::OneUpThreeDown => (1, 3),
            Self::TwoUpTwoDown => (2, 2),
        }
    }

    /// Nominal proportion correct the procedure converges near
    pub fn nominal_convergence(&self) -> f64 {
        match self {
            Self::SimpleUpDown => 0.5,
            Self::TwoUpOneDown | Self::OneUpTwoDown | Self::TwoUpTwoDown => 0.707,
            Self::ThreeUpOneDown | Self::OneUpThreeDown => 0.794,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::SimpleUpDown => "simple_up_down",
            Self::TwoUpOneDown => "two_up_one_down",
            Self::ThreeUpOneDown => "three_up_one_down",
            Self::OneUpTwoDown => "one_up_two_down",
            Self::OneUpThreeDown => "one_up_three_down",
            Self::TwoUpTwoDown => "two_up_two_down",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a rule name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown staircase rule: {0}")]
pub struct UnknownRule(pub String);

impl FromStr for RuleName {
    type Err = UnknownRule;

    /// Accepts both `two_up_one_down` and `TwoUpOneDown` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str().replace('_', "") == normalized)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// Which way "harder" moves the controlled value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionSemantics {
    /// Larger values are harder (spacing/eccentricity intensity)
    #[default]
    IncreaseIsHarder,
    /// Larger values are easier (stimulus duration)
    IncreaseIsEasier,
}

/// A triggered adjustment of the controlled value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Sign applied to the step size
    pub fn sign(self) -> f64 {
        match self {
            Self::Increase => 1.0,
            Self::Decrease => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase => write!(f, "increase"),
            Self::Decrease => write!(f, "decrease"),
        }
    }
}

/// Resolved rule descriptor `(n_up, m_down, direction)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaircaseRule {
    pub name: RuleName,
    /// Consecutive correct responses that make the task harder
    pub n_up: u32,
    /// Consecutive incorrect responses that make the task easier
    pub m_down: u32,
    pub direction: DirectionSemantics,
}

impl StaircaseRule {
    pub fn new(name: RuleName, direction: DirectionSemantics) -> Self {
        let (n_up, m_down) = name.thresholds();
        Self {
            name,
            n_up,
            m_down,
            direction,
        }
    }

    fn harder_triggered(&self, consecutive_correct: u32) -> bool {
        consecutive_correct >= self.n_up
    }

    fn easier_triggered(&self, consecutive_incorrect: u32) -> bool {
        consecutive_incorrect >= self.m_down
    }

    /// Whether the counters call for a larger controlled value
    pub fn should_increase(&self, consecutive_correct: u32, consecutive_incorrect: u32) -> bool {
        match self.direction {
            DirectionSemantics::IncreaseIsHarder => self.harder_triggered(consecutive_correct),
            DirectionSemantics::IncreaseIsEasier => self.easier_triggered(consecutive_incorrect),
        }
    }

    /// Whether the counters call for a smaller controlled value
    pub fn should_decrease(&self, consecutive_correct: u32, consecutive_incorrect: u32) -> bool {
        match self.direction {
            DirectionSemantics::IncreaseIsHarder => self.easier_triggered(consecutive_incorrect),
            DirectionSemantics::IncreaseIsEasier => self.harder_triggered(consecutive_correct),
        }
    }

    /// Combined decision; `None` means keep waiting.
    ///
    /// The counters are mutually exclusive, so at most one predicate holds.
    pub fn decide(&self, consecutive_correct: u32, consecutive_incorrect: u32) -> Option<Direction> {
        if self.should_increase(consecutive_correct, consecutive_incorrect) {
            Some(Direction::Increase)
        } else if self.should_decrease(consecutive_correct, consecutive_incorrect) {
            Some(Direction::Decrease)
        } else {
            None
        }
    }
}
