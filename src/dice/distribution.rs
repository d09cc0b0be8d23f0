//! Sparse probability distributions over roll totals
//!
//! Outcome `0` is reserved for a miss: the primary die showed its lowest
//! face and nothing else counts toward the total.

use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome key reserved for a miss
pub const MISS: i64 = 0;

/// Mapping from roll total to probability mass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityDistribution {
    masses: BTreeMap<i64, f64>,
}

impl ProbabilityDistribution {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// All mass on a single outcome
    pub fn certain(outcome: i64) -> Self {
        let mut dist = Self::new();
        dist.add(outcome, 1.0);
        dist
    }

    /// One fair die with faces `1..=die_size`
    pub fn uniform(die_size: u32) -> Self {
        let probability = 1.0 / die_size as f64;
        (1..=i64::from(die_size)).map(|face| (face, probability)).collect()
    }

    /// Accumulate `probability` onto `outcome`
    pub fn add(&mut self, outcome: i64, probability: f64) {
        if probability <= 0.0 {
            return;
        }
        *self.masses.entry(outcome).or_insert(0.0) += probability;
    }

    /// Probability mass of an outcome, `None` if it cannot occur
    pub fn get(&self, outcome: i64) -> Option<f64> {
        self.masses.get(&outcome).copied()
    }

    /// Probability of a miss
    pub fn miss_chance(&self) -> f64 {
        self.get(MISS).unwrap_or(0.0)
    }

    /// Sum of all masses
    pub fn total_mass(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Number of distinct outcomes
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Iterate `(outcome, probability)` pairs in ascending outcome order
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.masses.iter().map(|(&outcome, &p)| (outcome, p))
    }

    /// Smallest and largest outcome with nonzero mass
    pub fn range(&self) -> Option<(i64, i64)> {
        let min = self.masses.keys().next()?;
        let max = self.masses.keys().next_back()?;
        Some((*min, *max))
    }

    /// Add `modifier` to every outcome except a miss
    ///
    /// A hit pushed onto zero by a negative modifier lands in the miss
    /// bucket.
    pub fn with_modifier(self, modifier: i32) -> Self {
        if modifier == 0 {
            return self;
        }
        let offset = i64::from(modifier);
        self.iter()
            .map(|(outcome, p)| {
                if outcome == MISS {
                    (outcome, p)
                } else {
                    (outcome + offset, p)
                }
            })
            .collect()
    }
}

impl FromIterator<(i64, f64)> for ProbabilityDistribution {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (outcome, p) in iter {
            dist.add(outcome, p);
        }
        dist
    }
}
