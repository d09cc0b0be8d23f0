//! Summary statistics for a distribution

use serde::Serialize;

use super::distribution::{ProbabilityDistribution, MISS};
use super::engine::DiceEngine;
use super::notation::{parse_dice, NotationError};

/// Expected total, counting a miss as zero
pub fn total_average(dist: &ProbabilityDistribution) -> f64 {
    dist.iter().map(|(outcome, p)| outcome as f64 * p).sum()
}

/// Expected total given that the roll did not miss
pub fn average_on_hit(dist: &ProbabilityDistribution) -> f64 {
    let miss = dist.miss_chance();
    if miss == 0.0 {
        return total_average(dist);
    }

    let hit = 1.0 - miss;
    if hit <= 0.0 {
        return 0.0;
    }

    dist.iter()
        .filter(|&(outcome, _)| outcome != MISS)
        .map(|(outcome, p)| outcome as f64 * p / hit)
        .sum()
}

/// Headline numbers for a roll
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollSummary {
    pub notation: String,
    pub average_on_hit: f64,
    pub total_average: f64,
    pub miss_chance: f64,
}

impl RollSummary {
    pub fn from_distribution(notation: impl Into<String>, dist: &ProbabilityDistribution) -> Self {
        Self {
            notation: notation.into(),
            average_on_hit: average_on_hit(dist),
            total_average: total_average(dist),
            miss_chance: dist.miss_chance(),
        }
    }
}

/// Parse a notation and summarize it with the default engine
pub fn summarize(notation: &str) -> Result<RollSummary, NotationError> {
    let roll = parse_dice(notation)?;
    let dist = DiceEngine::default().distribution(&roll);
    Ok(RollSummary::from_distribution(notation.trim(), &dist))
}
