//! Live dice rolls
//!
//! Rolls real dice under the same rules the exact distribution uses and
//! records every die for display.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::combinatorics::select_kept;
use super::engine::{DiceEngine, EngineError};
use super::notation::DiceRoll;

/// Role a die played in a roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    /// The die that can miss or explode
    Primary,
    /// A kept die added at face value
    Regular,
    /// Bonus die granted by a critical primary die under the vicious rule
    Vicious,
    /// Rolled but discarded by advantage/disadvantage
    Dropped,
    /// Reroll in an explosion chain
    Explosion,
}

impl DieKind {
    /// Position when revealing dice one at a time
    pub fn display_rank(self) -> u8 {
        match self {
            DieKind::Primary => 0,
            DieKind::Regular | DieKind::Dropped => 1,
            DieKind::Explosion => 2,
            DieKind::Vicious => 3,
        }
    }
}

impl std::fmt::Display for DieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DieKind::Primary => "primary",
            DieKind::Regular => "regular",
            DieKind::Vicious => "vicious",
            DieKind::Dropped => "dropped",
            DieKind::Explosion => "explosion",
        };
        write!(f, "{}", s)
    }
}

/// One physical die in a simulated roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DieResult {
    pub value: u32,
    pub die_size: u32,
    #[serde(rename = "type")]
    pub kind: DieKind,
    pub is_crit: bool,
    pub is_miss: bool,
}

impl DieResult {
    fn new(value: u32, die_size: u32, kind: DieKind) -> Self {
        Self {
            value,
            die_size,
            kind,
            is_crit: false,
            is_miss: false,
        }
    }
}

/// A complete simulated roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Rolled dice first, then explosion and vicious dice as generated
    pub results: Vec<DieResult>,
    pub modifier: i32,
    pub total: i64,
}

impl RollResult {
    /// Whether the primary die missed
    pub fn is_miss(&self) -> bool {
        self.results.iter().any(|r| r.is_miss)
    }

    /// Dice in reveal order: primary, kept and dropped, explosions, vicious
    pub fn display_order(&self) -> Vec<&DieResult> {
        let mut ordered: Vec<&DieResult> = self.results.iter().collect();
        // stable sort keeps roll order within a rank
        ordered.sort_by_key(|r| r.kind.display_rank());
        ordered
    }
}

impl DiceEngine {
    /// Roll the dice once, refusing pools over the configured ceiling
    pub fn try_simulate<R: Rng>(
        &self,
        roll: &DiceRoll,
        rng: &mut R,
    ) -> Result<RollResult, EngineError> {
        self.check_cost(roll)?;
        Ok(self.simulate(roll, rng))
    }

    /// Roll the dice once
    pub fn simulate<R: Rng>(&self, roll: &DiceRoll, rng: &mut R) -> RollResult {
        if roll.tens_ones {
            return self.simulate_tens_ones(roll, rng);
        }

        let die_size = roll.die_size;
        let pool = roll.pool_size() as usize;
        let values: Vec<u32> = (0..pool).map(|_| rng.random_range(1..=die_size)).collect();

        let (kept, primary_index) = if roll.has_keep_rule() {
            let selection = select_kept(&values, roll.num_dice as usize, roll.keeps_highest());
            let primary = selection.primary().unwrap_or(0);
            (selection.kept, primary)
        } else {
            ((0..pool).collect(), 0)
        };

        let mut results: Vec<DieResult> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let kind = if i == primary_index {
                    DieKind::Primary
                } else if kept.contains(&i) {
                    DieKind::Regular
                } else {
                    DieKind::Dropped
                };
                DieResult::new(value, die_size, kind)
            })
            .collect();

        let primary = values[primary_index];
        let mut total: i64 = 0;

        if primary == 1 {
            results[primary_index].is_miss = true;
        } else {
            if primary == die_size {
                results[primary_index].is_crit = true;
                total += self.explode(die_size, roll.vicious, rng, &mut results);
            }
            total += kept.iter().map(|&i| i64::from(values[i])).sum::<i64>();
        }

        if total > 0 {
            total += i64::from(roll.modifier);
        }

        RollResult {
            results,
            modifier: roll.modifier,
            total,
        }
    }

    fn simulate_tens_ones<R: Rng>(&self, roll: &DiceRoll, rng: &mut R) -> RollResult {
        let die_size = roll.die_size;
        let pool = 2 + roll.extra_dice() as usize;
        let values: Vec<u32> = (0..pool).map(|_| rng.random_range(1..=die_size)).collect();

        let kept = if roll.has_keep_rule() {
            select_kept(&values, 2, roll.keeps_highest()).kept
        } else {
            vec![0, 1]
        };

        let results = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let kind = if kept.contains(&i) {
                    DieKind::Regular
                } else {
                    DieKind::Dropped
                };
                DieResult::new(value, die_size, kind)
            })
            .collect();

        let total = i64::from(values[kept[0]]) * 10 + i64::from(values[kept[1]]);

        RollResult {
            results,
            modifier: roll.modifier,
            total,
        }
    }

    /// Reroll a maximum face until the chain stops; returns the added value
    ///
    /// The last permitted reroll is kept even if it shows the maximum. A
    /// vicious crit adds one non-exploding die after the chain.
    fn explode<R: Rng>(
        &self,
        die_size: u32,
        vicious: bool,
        rng: &mut R,
        results: &mut Vec<DieResult>,
    ) -> i64 {
        let max_explosions = self.explosions.max_explosions();
        let mut added: i64 = 0;

        for level in 1..=max_explosions {
            let value = rng.random_range(1..=die_size);
            let is_max = value == die_size;
            results.push(DieResult {
                is_crit: is_max,
                ..DieResult::new(value, die_size, DieKind::Explosion)
            });
            added += i64::from(value);

            if !is_max || level == max_explosions {
                break;
            }
        }

        if vicious {
            let value = rng.random_range(1..=die_size);
            results.push(DieResult::new(value, die_size, DieKind::Vicious));
            added += i64::from(value);
        }

        added
    }
}

/// Roll the dice once with the default engine and thread-local randomness
pub fn simulate_roll(roll: &DiceRoll) -> RollResult {
    DiceEngine::default().simulate(roll, &mut rand::rng())
}
