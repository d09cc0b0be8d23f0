//! Dice probability engine
//!
//! Implements exploding-dice rules with:
//! - Dice notation parsing (e.g., "3d6v+2", "1d8a", "d66d2")
//! - Exact probability distributions of roll totals
//! - Misses on the primary die's lowest face, explosions on its highest
//! - Vicious bonus dice
//! - Advantage and disadvantage pools
//! - Paired-digit tens/ones dice
//! - Live simulated rolls with a die-by-die breakdown

mod combinatorics;
mod distribution;
mod engine;
mod explosion;
mod histogram;
mod notation;
mod simulate;
mod stats;

pub use combinatorics::{convolve, enumerate_outcomes, n_fold_convolve, select_kept, KeptDice};
pub use distribution::{ProbabilityDistribution, MISS};
pub use engine::{probability_distribution, DiceEngine, EngineError, MAX_POOL_DICE};
pub use explosion::{ExplosionModel, MAX_EXPLOSIONS};
pub use histogram::{histogram, HistogramBar, DISPLAY_THRESHOLD};
pub use notation::{parse_dice, DiceRoll, NotationError, MAX_EXTRA_DICE};
pub use simulate::{simulate_roll, DieKind, DieResult, RollResult};
pub use stats::{average_on_hit, summarize, total_average, RollSummary};
