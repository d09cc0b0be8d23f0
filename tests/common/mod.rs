//! Shared helpers for integration tests

#![allow(dead_code)]

use dicecalc::{parse_dice, probability_distribution, DiceRoll, ProbabilityDistribution};

/// Parse notation that is known to be valid
pub fn roll(notation: &str) -> DiceRoll {
    parse_dice(notation).unwrap_or_else(|e| panic!("{notation} should parse: {e}"))
}

/// Exact distribution of a notation with the default engine
pub fn dist(notation: &str) -> ProbabilityDistribution {
    probability_distribution(&roll(notation))
}

/// Mass of an outcome, failing if the outcome is impossible
pub fn mass(dist: &ProbabilityDistribution, outcome: i64) -> f64 {
    dist.get(outcome)
        .unwrap_or_else(|| panic!("outcome {outcome} has no mass"))
}

/// Assert two floats agree to `places` decimal places
pub fn assert_close(actual: f64, expected: f64, places: i32) {
    let tolerance = 10f64.powi(-places) / 2.0;
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual} (to {places} places)"
    );
}
