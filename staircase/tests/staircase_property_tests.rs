//! Staircase property tests — deterministic sweeps over generated response
//! sequences for every rule and both direction semantics.
//!
//! Tests verify:
//! - The controlled value never leaves [min, max]
//! - Consecutive counters are never both non-zero
//! - Step size is non-increasing and never below the floor
//! - Reversals alternate direction after the first
//! - Reset followed by replay reproduces the run bit-for-bit

use staircase::{
    Direction, DirectionSemantics, ResponseStatus, RuleName, StaircaseConfig,
    StaircaseController, StaircaseEvent,
};

/// Generate a response sequence from a seed with a simple LCG.
fn sequence(seed: u64, len: usize, correct_bias: u64) -> Vec<bool> {
    let mut x = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..len)
        .map(|_| {
            x = x
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (x >> 33) % 100 < correct_bias
        })
        .collect()
}

/// Narrow range with a large step so clamping is exercised constantly.
fn tight_config(rule: RuleName, direction: DirectionSemantics) -> StaircaseConfig {
    StaircaseConfig {
        rule,
        direction,
        initial_value: 0.5,
        min_value: 0.2,
        max_value: 0.8,
        initial_step: 0.25,
        final_step: 0.02,
        reversals_per_step_decay: 2,
        max_trials: 150,
        responses_per_trial: 1,
        min_reversals: 12,
        responses_after_min_reversals: 20,
        stop_on_reversals: true,
    }
}

fn all_configs() -> Vec<StaircaseConfig> {
    let mut configs = Vec::new();
    for rule in RuleName::ALL {
        for direction in [
            DirectionSemantics::IncreaseIsHarder,
            DirectionSemantics::IncreaseIsEasier,
        ] {
            configs.push(tight_config(rule, direction));
        }
    }
    configs
}

// ── Property: value stays in range ───────────────────────────────────

#[test]
fn prop_value_always_within_bounds() {
    for config in all_configs() {
        for seed in 0..20 {
            for bias in [10, 50, 90] {
                let mut sc = StaircaseController::initialize(config.clone()).unwrap();
                for correct in sequence(seed, 200, bias) {
                    let out = sc.process_response(correct);
                    assert!(
                        out.value >= config.min_value && out.value <= config.max_value,
                        "rule={} seed={} value={} out of range",
                        config.rule,
                        seed,
                        out.value
                    );
                }
                assert!(sc
                    .value_history()
                    .all(|v| v >= config.min_value && v <= config.max_value));
                assert!(sc
                    .reversals()
                    .iter()
                    .all(|r| r.value >= config.min_value && r.value <= config.max_value));
            }
        }
    }
}

// ── Property: counters are mutually exclusive ────────────────────────

#[test]
fn prop_consecutive_counters_exclusive() {
    for config in all_configs() {
        for seed in 0..20 {
            let mut sc = StaircaseController::initialize(config.clone()).unwrap();
            for correct in sequence(seed, 120, 60) {
                let out = sc.process_response(correct);
                let state = sc.state();
                assert!(
                    state.consecutive_correct == 0 || state.consecutive_incorrect == 0,
                    "rule={} both counters non-zero: {:?}",
                    config.rule,
                    state
                );
                if matches!(out.status, ResponseStatus::Adjusted(_)) {
                    assert_eq!(state.consecutive_correct, 0);
                    assert_eq!(state.consecutive_incorrect, 0);
                } else if out.status == ResponseStatus::Waiting {
                    assert!((state.consecutive_correct > 0) != (state.consecutive_incorrect > 0));
                }
            }
        }
    }
}

// ── Property: step is non-increasing with a floor ────────────────────

#[test]
fn prop_step_non_increasing_and_floored() {
    for config in all_configs() {
        for seed in 0..20 {
            let mut sc = StaircaseController::initialize(config.clone()).unwrap();
            let mut previous = sc.current_step();
            for correct in sequence(seed, 150, 50) {
                sc.process_response(correct);
                let step = sc.current_step();
                assert!(step <= previous, "step grew from {} to {}", previous, step);
                assert!(step >= config.final_step, "step {} below floor", step);
                previous = step;
            }
        }
    }
}

// ── Property: reversals alternate direction ──────────────────────────

#[test]
fn prop_reversals_alternate_direction() {
    for config in all_configs() {
        for seed in 0..10 {
            let mut sc = StaircaseController::initialize(config.clone()).unwrap();
            let mut reversal_directions: Vec<Direction> = Vec::new();
            for correct in sequence(seed, 150, 55) {
                let out = sc.process_response(correct);
                if out.reversal.is_some() {
                    if let ResponseStatus::Adjusted(direction) = out.status {
                        reversal_directions.push(direction);
                    } else {
                        panic!("reversal without an adjustment");
                    }
                }
            }
            assert!(reversal_directions.windows(2).all(|w| w[0] != w[1]));
            assert_eq!(reversal_directions.len() as u32, sc.reversal_count());

            let indices: Vec<u32> = sc.reversals().iter().map(|r| r.reversal_index).collect();
            let expected: Vec<u32> = (1..=sc.reversal_count()).collect();
            assert_eq!(indices, expected);
        }
    }
}

// ── Property: at most one reversal per response ──────────────────────

#[test]
fn prop_reversal_response_indices_strictly_increase() {
    for config in all_configs() {
        let mut sc = StaircaseController::initialize(config).unwrap();
        for correct in sequence(7, 150, 50) {
            sc.process_response(correct);
        }
        let indices: Vec<u64> = sc.reversals().iter().map(|r| r.response_index).collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}

// ── Property: reset + replay is bit-for-bit identical ────────────────

#[test]
fn prop_reset_replay_is_deterministic() {
    for config in all_configs() {
        for seed in 0..5 {
            let responses = sequence(seed, 180, 65);
            let mut sc = StaircaseController::initialize(config.clone()).unwrap();

            let first_trajectory: Vec<u64> = responses
                .iter()
                .map(|&c| sc.process_response(c).value.to_bits())
                .collect();
            let first_snapshot = sc.snapshot();
            let first_events = sc.drain_events();

            sc.reset();
            let second_trajectory: Vec<u64> = responses
                .iter()
                .map(|&c| sc.process_response(c).value.to_bits())
                .collect();

            assert_eq!(first_trajectory, second_trajectory);
            assert_eq!(first_snapshot, sc.snapshot());
            assert_eq!(first_events, sc.drain_events());
        }
    }
}

// ── Property: completion is terminal ─────────────────────────────────

#[test]
fn prop_no_mutation_after_completion() {
    for config in all_configs() {
        let mut sc = StaircaseController::initialize(config).unwrap();
        let mut responses = sequence(3, 400, 50).into_iter();
        while !sc.is_complete() {
            let correct = responses.next().expect("run should complete within 400 responses");
            sc.process_response(correct);
        }
        let frozen = sc.snapshot();
        for correct in responses.take(10) {
            let out = sc.process_response(correct);
            assert!(out.is_already_complete());
            assert!(matches!(
                out.events.as_slice(),
                [StaircaseEvent::AlreadyComplete { .. }]
            ));
        }
        assert_eq!(frozen, sc.snapshot());
    }
}
