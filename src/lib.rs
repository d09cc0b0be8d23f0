//! dicecalc - exploding dice probability engine
//!
//! Parses dice notation, computes the exact distribution of a roll's total
//! under exploding/vicious/advantage rules, and simulates individual rolls
//! for display.

pub mod config;
pub mod dice;
pub mod report;

pub use config::{ConfigError, EngineConfig};
pub use dice::{
    average_on_hit, histogram, parse_dice, probability_distribution, simulate_roll, summarize,
    total_average, DiceEngine, DiceRoll, DieKind, DieResult, EngineError, HistogramBar,
    NotationError, ProbabilityDistribution, RollResult, RollSummary,
};
