//! Parsing recorded correctness sequences.
//!
//! Accepts tokens separated by commas and/or whitespace; `#` starts a
//! comment that runs to the end of the line.

use thiserror::Error;

/// A token that is not a recognised correctness marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognised response token '{token}' at position {position} (expected 1/0, c/i, y/n, true/false)")]
pub struct ResponseParseError {
    pub token: String,
    /// 1-based position among the tokens
    pub position: usize,
}

fn parse_token(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "c" | "y" | "t" | "true" | "correct" | "yes" => Some(true),
        "0" | "i" | "n" | "f" | "false" | "incorrect" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a full response list.
pub fn parse_responses(input: &str) -> Result<Vec<bool>, ResponseParseError> {
    input
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            parse_token(token).ok_or_else(|| ResponseParseError {
                token: token.to_string(),
                position: i + 1,
            })
        })
        .collect()
}
