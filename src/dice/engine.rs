//! Exact probability distributions for parsed dice rolls
//!
//! Four evaluation paths:
//! - paired-digit dice, uniform over every (tens, ones) pair
//! - advantage/disadvantage pools, enumerated tuple by tuple because the
//!   primary die depends on which dice are kept and where they sit
//! - a single primary die
//! - a primary die convolved with the plain dice that follow it

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, trace};

use super::combinatorics::{convolve, enumerate_outcomes, n_fold_convolve, select_kept};
use super::distribution::{ProbabilityDistribution, MISS};
use super::explosion::ExplosionModel;
use super::notation::DiceRoll;
use crate::config::EngineConfig;

/// Default ceiling on dice enumerated for one roll
pub const MAX_POOL_DICE: u32 = 13;

/// Errors raised before evaluating a roll
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("pool of {dice} dice exceeds the limit of {limit}")]
    PoolTooLarge { dice: u32, limit: u32 },
}

/// Evaluates dice rolls exactly or by simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceEngine {
    pub(crate) explosions: ExplosionModel,
    max_pool_dice: u32,
}

impl Default for DiceEngine {
    fn default() -> Self {
        Self {
            explosions: ExplosionModel::default(),
            max_pool_dice: MAX_POOL_DICE,
        }
    }
}

impl DiceEngine {
    /// Create an engine from configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            explosions: ExplosionModel::new(config.max_explosions),
            max_pool_dice: config.max_pool_dice,
        }
    }

    /// Override the explosion depth
    pub fn with_max_explosions(mut self, max_explosions: u32) -> Self {
        self.explosions = ExplosionModel::new(max_explosions);
        self
    }

    pub fn explosion_model(&self) -> ExplosionModel {
        self.explosions
    }

    /// Refuse rolls whose pool would be too costly to enumerate
    pub fn check_cost(&self, roll: &DiceRoll) -> Result<(), EngineError> {
        let dice = roll.pool_size();
        if dice > self.max_pool_dice {
            return Err(EngineError::PoolTooLarge {
                dice,
                limit: self.max_pool_dice,
            });
        }
        Ok(())
    }

    /// Exact distribution of the roll's total
    pub fn distribution(&self, roll: &DiceRoll) -> ProbabilityDistribution {
        let (strategy, base) = if roll.tens_ones {
            ("tens-ones", self.tens_ones(roll))
        } else if roll.has_keep_rule() {
            ("keep-pool", self.keep_pool(roll))
        } else if roll.num_dice == 1 {
            ("single", self.primary_die(roll.die_size, roll.vicious))
        } else {
            let primary = self.primary_die(roll.die_size, roll.vicious);
            let rest = n_fold_convolve(roll.die_size, roll.num_dice - 1);
            ("pool", convolve(&primary, &rest))
        };

        let result = base.with_modifier(roll.modifier);
        debug!(
            roll = %roll,
            strategy,
            outcomes = result.len(),
            "computed distribution"
        );
        result
    }

    /// One primary die: lowest face misses, highest face explodes
    fn primary_die(&self, die_size: u32, vicious: bool) -> ProbabilityDistribution {
        let face_p = 1.0 / die_size as f64;
        let size = i64::from(die_size);
        let mut result = ProbabilityDistribution::new();

        result.add(MISS, face_p);
        for face in 2..size {
            result.add(face, face_p);
        }
        if die_size > 1 {
            for (extra, p) in self.explosions.distribution(die_size, vicious).iter() {
                result.add(size + extra, p * face_p);
            }
        }
        result
    }

    /// Paired-digit dice, read as tens then ones in roll order
    fn tens_ones(&self, roll: &DiceRoll) -> ProbabilityDistribution {
        let die_size = roll.die_size;
        let mut result = ProbabilityDistribution::new();

        if !roll.has_keep_rule() {
            let pair_p = 1.0 / f64::from(die_size * die_size);
            for tens in 1..=i64::from(die_size) {
                for ones in 1..=i64::from(die_size) {
                    result.add(tens * 10 + ones, pair_p);
                }
            }
            return result;
        }

        let pool = 2 + roll.extra_dice();
        let tuple_p = (1.0 / die_size as f64).powi(pool as i32);
        let keep_highest = roll.keeps_highest();
        trace!(
            pool,
            die_size,
            tuples = u64::from(die_size).saturating_pow(pool),
            "enumerating paired-digit outcomes"
        );

        enumerate_outcomes(pool as usize, die_size, |rolls| {
            let kept = select_kept(rolls, 2, keep_highest);
            let tens = i64::from(rolls[kept.kept[0]]);
            let ones = i64::from(rolls[kept.kept[1]]);
            result.add(tens * 10 + ones, tuple_p);
        });
        result
    }

    /// Advantage/disadvantage pool with a primary die
    fn keep_pool(&self, roll: &DiceRoll) -> ProbabilityDistribution {
        let die_size = roll.die_size;
        let size = i64::from(die_size);
        let pool = roll.pool_size();
        let keep = roll.num_dice as usize;
        let keep_highest = roll.keeps_highest();
        let tuple_p = (1.0 / die_size as f64).powi(pool as i32);
        trace!(
            pool,
            die_size,
            tuples = u64::from(die_size).saturating_pow(pool),
            "enumerating keep-pool outcomes"
        );

        let mut result = ProbabilityDistribution::new();
        // crit mass keyed by the sum of the other kept dice
        let mut crits: BTreeMap<i64, f64> = BTreeMap::new();

        enumerate_outcomes(pool as usize, die_size, |rolls| {
            let kept = select_kept(rolls, keep, keep_highest);
            let (primary, others) = match kept.kept.split_first() {
                Some((&first, others)) => (rolls[first], others),
                None => return,
            };
            let rest: i64 = others.iter().map(|&i| i64::from(rolls[i])).sum();

            if primary == 1 {
                result.add(MISS, tuple_p);
            } else if primary == die_size {
                *crits.entry(rest).or_insert(0.0) += tuple_p;
            } else {
                result.add(i64::from(primary) + rest, tuple_p);
            }
        });

        if !crits.is_empty() {
            let explosion = self.explosions.distribution(die_size, roll.vicious);
            for (rest, crit_p) in crits {
                for (extra, p) in explosion.iter() {
                    result.add(size + extra + rest, crit_p * p);
                }
            }
        }
        result
    }
}

/// Exact distribution with the default engine
pub fn probability_distribution(roll: &DiceRoll) -> ProbabilityDistribution {
    DiceEngine::default().distribution(roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::parse_dice;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "expected {expected}, got {actual}"
        );
    }

    fn dist(notation: &str) -> ProbabilityDistribution {
        probability_distribution(&parse_dice(notation).unwrap())
    }

    #[test]
    fn test_single_die() {
        let d = dist("1d6");
        assert_close(d.get(0).unwrap(), 1.0 / 6.0);
        assert_eq!(d.get(1), None);
        assert_close(d.get(2).unwrap(), 1.0 / 6.0);
        assert_close(d.get(5).unwrap(), 1.0 / 6.0);
        assert_eq!(d.get(6), None);
        assert_close(d.get(7).unwrap(), 1.0 / 36.0);
        assert_eq!(d.get(12), None);
        assert_close(d.get(13).unwrap(), 1.0 / 216.0);
    }

    #[test]
    fn test_one_sided_die_always_misses() {
        let d = dist("1d1");
        assert_eq!(d.get(0), Some(1.0));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_two_sided_die() {
        let d = dist("1d2");
        assert_close(d.get(0).unwrap(), 0.5);
        assert_close(d.get(3).unwrap(), 0.25);
        assert_close(d.get(5).unwrap(), 0.125);
    }

    #[test]
    fn test_pool_miss_absorbs_other_dice() {
        let d = dist("2d4");
        assert_close(d.get(0).unwrap(), 0.25);
        // primary 2 or 3 plus a plain d4
        assert_close(d.get(3).unwrap(), 1.0 / 16.0);
        assert_close(d.get(4).unwrap(), 2.0 / 16.0);
        assert_eq!(d.get(2), None);
    }

    #[test]
    fn test_modifier_applied_to_hits_only() {
        let base = dist("1d6");
        let plus = dist("1d6+2");
        assert_eq!(plus.get(0), base.get(0));
        assert_eq!(plus.get(4), base.get(2));
        assert_eq!(plus.get(2), None);
    }

    #[test]
    fn test_keep_pool_matches_closed_form() {
        let d = dist("1d6a");
        assert_close(d.get(0).unwrap(), 1.0 / 36.0);
        for k in 2..6 {
            let expected = (k as f64 / 6.0).powi(2) - ((k - 1) as f64 / 6.0).powi(2);
            assert_close(d.get(k).unwrap(), expected);
        }
    }

    #[test]
    fn test_tens_ones_uniform() {
        let d = dist("d44");
        assert_eq!(d.len(), 16);
        assert_eq!(d.get(0), None);
        assert_close(d.get(11).unwrap(), 1.0 / 16.0);
        assert_close(d.get(44).unwrap(), 1.0 / 16.0);
        assert_eq!(d.get(15), None);
        assert_close(d.total_mass(), 1.0);
    }

    #[test]
    fn test_check_cost() {
        let engine = DiceEngine::default();
        assert!(engine.check_cost(&parse_dice("7d6a6").unwrap()).is_ok());
        assert_eq!(
            engine.check_cost(&parse_dice("8d6a6").unwrap()),
            Err(EngineError::PoolTooLarge { dice: 14, limit: 13 })
        );
    }

    #[test]
    fn test_check_cost_huge_count() {
        let roll = parse_dice("4294967295d6a").unwrap();
        assert_eq!(
            DiceEngine::default().check_cost(&roll),
            Err(EngineError::PoolTooLarge {
                dice: u32::MAX,
                limit: 13
            })
        );
    }

    #[test]
    fn test_engine_from_config() {
        let config = EngineConfig {
            max_explosions: 1,
            ..EngineConfig::default()
        };
        let engine = DiceEngine::new(&config);
        assert_eq!(engine.explosion_model().max_explosions(), 1);

        let d = engine.distribution(&parse_dice("1d6").unwrap());
        assert_eq!(d.range(), Some((0, 11)));
        assert_eq!(d.get(13), None);
    }
}
