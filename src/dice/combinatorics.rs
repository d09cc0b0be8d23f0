//! Stateless combinators over distributions and rolled pools

use std::cmp::Reverse;

use super::distribution::{ProbabilityDistribution, MISS};

/// Distribution of the sum of two independent distributions
///
/// A miss in `left` absorbs: its mass is carried through at outcome `0`
/// without adding anything from `right`.
pub fn convolve(
    left: &ProbabilityDistribution,
    right: &ProbabilityDistribution,
) -> ProbabilityDistribution {
    let mut result = ProbabilityDistribution::new();
    for (a, pa) in left.iter() {
        if a == MISS {
            result.add(MISS, pa);
            continue;
        }
        for (b, pb) in right.iter() {
            result.add(a + b, pa * pb);
        }
    }
    result
}

/// Sum of `count` plain dice (no miss, no explosion)
///
/// `count == 0` yields certainty at `0`, the neutral element for
/// [`convolve`].
pub fn n_fold_convolve(die_size: u32, count: u32) -> ProbabilityDistribution {
    if count == 0 {
        return ProbabilityDistribution::certain(0);
    }
    let single = ProbabilityDistribution::uniform(die_size);
    let mut result = single.clone();
    for _ in 1..count {
        result = convolve(&result, &single);
    }
    result
}

/// Outcome of a keep-highest/keep-lowest selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptDice {
    /// Indices of kept dice, in the order they were rolled
    pub kept: Vec<usize>,
    /// Indices of dropped dice, ascending
    pub dropped: Vec<usize>,
}

impl KeptDice {
    /// Index of the primary die (first kept die in roll order)
    pub fn primary(&self) -> Option<usize> {
        self.kept.first().copied()
    }

    pub fn is_dropped(&self, index: usize) -> bool {
        self.dropped.binary_search(&index).is_ok()
    }
}

/// Keep `keep` dice out of `values`, dropping the rest
///
/// Keeping highest orders `(value, index)` ascending and drops from the
/// front; keeping lowest orders `(value, index)` descending and drops from
/// the front. Equal faces are therefore decided by roll position.
pub fn select_kept(values: &[u32], keep: usize, keep_highest: bool) -> KeptDice {
    let mut order: Vec<usize> = (0..values.len()).collect();
    if keep_highest {
        order.sort_unstable_by_key(|&i| (values[i], i));
    } else {
        order.sort_unstable_by_key(|&i| Reverse((values[i], i)));
    }

    let drop_count = values.len().saturating_sub(keep);
    let mut dropped = order[..drop_count].to_vec();
    dropped.sort_unstable();

    let kept = (0..values.len())
        .filter(|i| dropped.binary_search(i).is_err())
        .collect();

    KeptDice { kept, dropped }
}

/// Visit every ordered tuple of `num_dice` faces in `1..=die_size`
///
/// Visits `die_size^num_dice` tuples; callers bound `num_dice`.
pub fn enumerate_outcomes<F>(num_dice: usize, die_size: u32, mut visit: F)
where
    F: FnMut(&[u32]),
{
    let mut rolls = vec![1; num_dice];
    fill_position(&mut rolls, 0, die_size, &mut visit);
}

fn fill_position<F>(rolls: &mut [u32], position: usize, die_size: u32, visit: &mut F)
where
    F: FnMut(&[u32]),
{
    if position == rolls.len() {
        visit(rolls);
        return;
    }
    for face in 1..=die_size {
        rolls[position] = face;
        fill_position(rolls, position + 1, die_size, visit);
    }
}
