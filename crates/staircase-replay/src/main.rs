use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use staircase_replay::{load_config, load_responses, replay};
use std::path::PathBuf;
use tracing::info;

/// Output format for the replay report
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Staircase config in TOML form
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in config: intensity or duration
    #[arg(long)]
    preset: Option<String>,

    /// Inline responses, e.g. "1,0,1,1" or "c i c c"
    #[arg(long)]
    responses: Option<String>,

    /// File with responses (same token syntax, # comments allowed)
    #[arg(long)]
    responses_file: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Include the full event stream in the JSON report
    #[arg(long, default_value_t = false)]
    events: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = load_config(args.config.as_deref(), args.preset.as_deref())?;
    let responses = load_responses(args.responses.as_deref(), args.responses_file.as_deref())?;
    info!(
        rule = %config.rule,
        responses = responses.len(),
        max_responses = config.max_responses(),
        "Replaying staircase"
    );

    let report = replay(config, &responses, args.events)?;

    match args.format {
        Format::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
        Format::Text => {
            println!("{}", report.summary);
            if report.ignored_responses > 0 {
                println!(
                    "Ignored {} responses after completion",
                    report.ignored_responses
                );
            }
        }
    }

    Ok(())
}
