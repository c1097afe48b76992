//! File-based replay tests: TOML configs and response logs on disk.

use staircase::{DirectionSemantics, RuleName};
use staircase_replay::{load_config, load_responses, replay, ReplayReport};
use std::io::Write;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).unwrap();
    file
}

const WORKED_EXAMPLE_TOML: &str = r#"
rule = "two_up_one_down"
direction = "increase_is_harder"
initial_value = 1.0
min_value = 0.0
max_value = 2.0
initial_step = 0.1
final_step = 0.0125
reversals_per_step_decay = 4
max_trials = 100
min_reversals = 8
responses_after_min_reversals = 10
"#;

#[test]
fn test_replay_from_files() {
    let config_file = write_temp(WORKED_EXAMPLE_TOML);
    let responses_file = write_temp("# subject 07, block 1\n0, 1, 1\n0 1 1\n");

    let config = load_config(Some(config_file.path()), None).unwrap();
    assert_eq!(config.rule, RuleName::TwoUpOneDown);
    assert_eq!(config.direction, DirectionSemantics::IncreaseIsHarder);

    let responses = load_responses(None, Some(responses_file.path())).unwrap();
    assert_eq!(responses, vec![false, true, true, false, true, true]);

    let report = replay(config, &responses, true).unwrap();
    assert_eq!(report.summary.reversals, 4);
    assert!((report.summary.final_value - 1.0).abs() < 1e-9);
    assert!((report.summary.final_step - 0.05).abs() < 1e-12);
    assert!(!report.summary.threshold.provisional);
}

#[test]
fn test_inline_and_file_responses_concatenate() {
    let responses_file = write_temp("c c i");
    let responses = load_responses(Some("i"), Some(responses_file.path())).unwrap();
    assert_eq!(responses, vec![false, true, true, false]);
}

#[test]
fn test_invalid_config_file_names_path() {
    let config_file = write_temp("rule = \"two_up_one_down\"\ninitial_value = 1.0\n");
    let err = load_config(Some(config_file.path()), None).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains(&config_file.path().display().to_string()));
    assert!(message.contains("Invalid staircase config TOML"));
}

#[test]
fn test_bad_response_token_in_file() {
    let responses_file = write_temp("1 0 x");
    let err = load_responses(None, Some(responses_file.path())).unwrap_err();
    assert!(format!("{:#}", err).contains("'x' at position 3"));
}

#[test]
fn test_report_serializes_to_json() {
    let report = replay(
        staircase::StaircaseConfig::duration_preset(),
        &[true, true, false, false],
        true,
    )
    .unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let back: ReplayReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.summary.responses, 4);
    assert_eq!(back.snapshot.reversals.len(), 2);
    assert_eq!(back.events.len(), report.events.len());
}
