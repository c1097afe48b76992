//! Where the config and the response sequence come from.

use crate::responses::parse_responses;
use anyhow::{bail, Context, Result};
use staircase::StaircaseConfig;
use std::path::Path;

/// Load a TOML config file, or fall back to a named preset.
pub fn load_config(path: Option<&Path>, preset: Option<&str>) -> Result<StaircaseConfig> {
    match (path, preset) {
        (Some(_), Some(_)) => bail!("Pass either --config or --preset, not both"),
        (Some(path), None) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            StaircaseConfig::from_toml_str(&content)
                .with_context(|| format!("Invalid config {}", path.display()))
        }
        (None, Some(name)) => StaircaseConfig::preset(name)
            .with_context(|| format!("Unknown preset '{}' (expected intensity or duration)", name)),
        (None, None) => Ok(StaircaseConfig::default()),
    }
}

/// Collect responses from the inline argument and/or a file, inline first.
pub fn load_responses(inline: Option<&str>, file: Option<&Path>) -> Result<Vec<bool>> {
    let mut responses = Vec::new();
    if let Some(inline) = inline {
        responses.extend(parse_responses(inline).context("Invalid --responses value")?);
    }
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read responses {}", path.display()))?;
        responses.extend(
            parse_responses(&content)
                .with_context(|| format!("Invalid responses in {}", path.display()))?,
        );
    }
    Ok(responses)
}
