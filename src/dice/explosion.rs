//! Exploding dice
//!
//! Once a primary die shows its maximum face it is rolled again and the
//! new face added, for as long as the maximum keeps coming up. The chain is
//! cut off after a fixed number of rerolls; a chain that would continue
//! past the limit is left out of the distribution entirely, so the mass of
//! an exploding roll sums to slightly less than one.
//!
//! With the vicious rule a crit also grants one plain bonus die once the
//! chain ends, however many times it exploded.

use super::combinatorics::convolve;
use super::distribution::ProbabilityDistribution;

/// Default number of rerolls a single chain may take
pub const MAX_EXPLOSIONS: u32 = 4;

/// Depth-bounded explosion rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplosionModel {
    max_explosions: u32,
}

impl Default for ExplosionModel {
    fn default() -> Self {
        Self {
            max_explosions: MAX_EXPLOSIONS,
        }
    }
}

impl ExplosionModel {
    /// Create a model allowing `max_explosions` rerolls (at least one)
    pub fn new(max_explosions: u32) -> Self {
        Self {
            max_explosions: max_explosions.max(1),
        }
    }

    pub fn max_explosions(&self) -> u32 {
        self.max_explosions
    }

    /// Value added on top of an initial maximum face
    ///
    /// The caller adds the initial `die_size` itself and scales by the
    /// chance of having rolled it.
    pub fn distribution(&self, die_size: u32, vicious: bool) -> ProbabilityDistribution {
        let mut chain = ProbabilityDistribution::new();
        let face_p = 1.0 / die_size as f64;
        let size = i64::from(die_size);

        // running state of the chain before the current reroll
        let mut chain_value: i64 = 0;
        let mut chain_p = 1.0;

        for _ in 0..self.max_explosions {
            chain_p *= face_p;

            // any face below the maximum ends the chain here
            for face in 1..size {
                chain.add(chain_value + face, chain_p);
            }
            chain_value += size;
        }

        if vicious {
            convolve(&chain, &ProbabilityDistribution::uniform(die_size))
        } else {
            chain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_plain_chain_levels() {
        let dist = ExplosionModel::default().distribution(6, false);

        // one reroll showing 1..5
        assert_close(dist.get(1).unwrap(), 1.0 / 6.0);
        assert_close(dist.get(5).unwrap(), 1.0 / 6.0);
        // a six always rerolls
        assert_eq!(dist.get(6), None);
        // 6 then 1
        assert_close(dist.get(7).unwrap(), 1.0 / 36.0);
        // fourth reroll is the deepest level
        assert_close(dist.get(19).unwrap(), (1.0_f64 / 6.0).powi(4));
        assert_eq!(dist.get(24), None);
        assert_eq!(dist.get(25), None);
    }

    #[test]
    fn test_plain_mass_truncated() {
        let dist = ExplosionModel::default().distribution(4, false);
        let lost = (1.0_f64 / 4.0).powi(4);
        assert_close(dist.total_mass(), 1.0 - lost);
    }

    #[test]
    fn test_depth_is_configurable() {
        let shallow = ExplosionModel::new(1).distribution(6, false);
        assert_eq!(shallow.range(), Some((1, 5)));
        assert_close(shallow.total_mass(), 5.0 / 6.0);

        let deep = ExplosionModel::new(8).distribution(6, false);
        assert!(deep.total_mass() > ExplosionModel::default().distribution(6, false).total_mass());
        assert_eq!(ExplosionModel::new(0).max_explosions(), 1);
    }

    #[test]
    fn test_vicious_one_bonus_die_per_crit() {
        let dist = ExplosionModel::default().distribution(4, true);
        // reroll 1, bonus die 1
        assert_close(dist.get(2).unwrap(), 1.0 / 16.0);
        // reroll 1 + bonus 2, or reroll 2 + bonus 1
        assert_close(dist.get(3).unwrap(), 2.0 / 16.0);
        // 4 then 1..3, plus a single bonus die summing to 9
        assert_close(dist.get(9).unwrap(), 3.0 * (1.0_f64 / 4.0).powi(3));
        // the bonus die always adds at least 1
        assert_eq!(dist.get(1), None);
    }

    #[test]
    fn test_vicious_mass_truncated() {
        let dist = ExplosionModel::default().distribution(6, true);
        let lost = (1.0_f64 / 6.0).powi(4);
        assert!((dist.total_mass() - (1.0 - lost)).abs() < 1e-9);
    }
}
