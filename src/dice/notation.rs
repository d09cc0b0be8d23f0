//! Dice notation parser
//!
//! Parses notation like "3d6v+2", "1d8a", "2d4d2-1" and the paired-digit
//! dice "d44", "d66", "d88" (optionally with advantage or disadvantage,
//! e.g. "d66d2").

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Largest number of extra dice advantage or disadvantage may add
pub const MAX_EXTRA_DICE: u32 = 6;

static STANDARD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)d(\d+)((?:v|a\d*|d\d*)*)(?:([+-])(\d+))?$").unwrap()
});

static TENS_ONES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^d(44|66|88)(?:a(\d*)|d(\d*))?$").unwrap());

static FLAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"v|a(\d*)|d(\d*)").unwrap());

/// Reasons a notation string is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("Invalid dice notation: {0:?}")]
    Unrecognized(String),

    #[error("Invalid dice notation: dice count must be at least 1")]
    NoDice,

    #[error("Invalid dice notation: die sides must be at least 1")]
    NoSides,

    #[error("Invalid dice notation: cannot combine advantage and disadvantage")]
    AdvantageAndDisadvantage,

    #[error("Advantage values over 6 are not supported for performance reasons")]
    AdvantageTooHigh(u32),

    #[error("Disadvantage values over 6 are not supported for performance reasons")]
    DisadvantageTooHigh(u32),
}

impl NotationError {
    /// Whether the notation was rejected only for asking for too many extra dice
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self,
            NotationError::AdvantageTooHigh(_) | NotationError::DisadvantageTooHigh(_)
        )
    }
}

/// A parsed dice roll specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRoll {
    /// Number of dice to roll before advantage/disadvantage
    pub num_dice: u32,
    /// Number of sides per die (per digit for tens/ones dice)
    pub die_size: u32,
    /// Modifier added to any total that is not a miss
    pub modifier: i32,
    /// Every maximum face in an explosion grants a bonus die
    pub vicious: bool,
    /// Extra dice rolled, keeping the highest
    pub advantage: u32,
    /// Extra dice rolled, keeping the lowest
    pub disadvantage: u32,
    /// Paired-digit die (d44/d66/d88) read as tens and ones
    pub tens_ones: bool,
}

impl DiceRoll {
    /// Create a plain dice roll
    pub fn new(num_dice: u32, die_size: u32, modifier: i32) -> Self {
        Self {
            num_dice,
            die_size,
            modifier,
            vicious: false,
            advantage: 0,
            disadvantage: 0,
            tens_ones: false,
        }
    }

    /// Create a paired-digit die, e.g. `tens_ones(6)` for d66
    pub fn tens_ones(die_size: u32) -> Self {
        Self {
            tens_ones: true,
            ..Self::new(2, die_size, 0)
        }
    }

    pub fn with_vicious(mut self) -> Self {
        self.vicious = true;
        self
    }

    pub fn with_advantage(mut self, extra: u32) -> Self {
        self.advantage = extra;
        self
    }

    pub fn with_disadvantage(mut self, extra: u32) -> Self {
        self.disadvantage = extra;
        self
    }

    /// Number of dice added by advantage or disadvantage
    pub fn extra_dice(&self) -> u32 {
        self.advantage.max(self.disadvantage)
    }

    /// Total number of dice physically rolled, saturating at `u32::MAX`
    pub fn pool_size(&self) -> u32 {
        self.num_dice.saturating_add(self.extra_dice())
    }

    /// Whether some rolled dice will be dropped
    pub fn has_keep_rule(&self) -> bool {
        self.extra_dice() > 0
    }

    /// Advantage keeps the highest dice, disadvantage the lowest
    pub fn keeps_highest(&self) -> bool {
        self.advantage > 0
    }

    /// Check the invariants every parsed roll satisfies
    pub fn validate(&self) -> Result<(), NotationError> {
        if self.num_dice == 0 {
            return Err(NotationError::NoDice);
        }
        if self.die_size == 0 {
            return Err(NotationError::NoSides);
        }
        // the limit messages take precedence over mixing both rules
        if self.advantage > MAX_EXTRA_DICE {
            return Err(NotationError::AdvantageTooHigh(self.advantage));
        }
        if self.disadvantage > MAX_EXTRA_DICE {
            return Err(NotationError::DisadvantageTooHigh(self.disadvantage));
        }
        if self.advantage > 0 && self.disadvantage > 0 {
            return Err(NotationError::AdvantageAndDisadvantage);
        }
        Ok(())
    }
}

impl FromStr for DiceRoll {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice(s)
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.tens_ones {
            write!(f, "d{0}{0}", self.die_size)?;
        } else {
            write!(f, "{}d{}", self.num_dice, self.die_size)?;
            if self.vicious {
                write!(f, "v")?;
            }
        }

        match (self.advantage, self.disadvantage) {
            (0, 0) => {}
            (1, 0) => write!(f, "a")?,
            (n, 0) => write!(f, "a{}", n)?,
            (_, 1) => write!(f, "d")?,
            (_, n) => write!(f, "d{}", n)?,
        }

        if self.modifier > 0 {
            write!(f, "+{}", self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}", self.modifier)
        } else {
            Ok(())
        }
    }
}

/// Parse a dice notation string like "3d6v+2" or "d66a"
pub fn parse_dice(notation: &str) -> Result<DiceRoll, NotationError> {
    let notation = notation.trim().to_lowercase();

    let roll = if let Some(caps) = TENS_ONES_REGEX.captures(&notation) {
        let die_size = parse_count(&caps[1], &notation)? / 11;
        let mut roll = DiceRoll::tens_ones(die_size);
        if let Some(extra) = caps.get(2) {
            roll.advantage = parse_extra(extra.as_str());
        }
        if let Some(extra) = caps.get(3) {
            roll.disadvantage = parse_extra(extra.as_str());
        }
        roll
    } else if let Some(caps) = STANDARD_REGEX.captures(&notation) {
        let num_dice = parse_count(&caps[1], &notation)?;
        let die_size = parse_count(&caps[2], &notation)?;

        // paired-digit sizes only exist in the d44/d66/d88 form
        if matches!(die_size, 44 | 66 | 88) {
            return Err(NotationError::Unrecognized(notation.clone()));
        }

        let mut roll = DiceRoll::new(num_dice, die_size, 0);
        parse_flags(&caps[3], &mut roll);

        if let (Some(sign), Some(amount)) = (caps.get(4), caps.get(5)) {
            let amount: i32 = amount
                .as_str()
                .parse()
                .map_err(|_| NotationError::Unrecognized(notation.clone()))?;
            roll.modifier = if sign.as_str() == "-" { -amount } else { amount };
        }
        roll
    } else {
        return Err(NotationError::Unrecognized(notation.clone()));
    };

    roll.validate()?;
    Ok(roll)
}

/// Apply the first `v`, `a[N]` and `d[N]` flags found
fn parse_flags(flags: &str, roll: &mut DiceRoll) {
    let mut seen_advantage = false;
    let mut seen_disadvantage = false;

    for caps in FLAG_REGEX.captures_iter(flags) {
        if let Some(extra) = caps.get(1) {
            if !seen_advantage {
                roll.advantage = parse_extra(extra.as_str());
                seen_advantage = true;
            }
        } else if let Some(extra) = caps.get(2) {
            if !seen_disadvantage {
                roll.disadvantage = parse_extra(extra.as_str());
                seen_disadvantage = true;
            }
        } else {
            roll.vicious = true;
        }
    }
}

fn parse_count(digits: &str, notation: &str) -> Result<u32, NotationError> {
    digits
        .parse()
        .map_err(|_| NotationError::Unrecognized(notation.to_string()))
}

/// A bare flag means one extra die; oversized counts saturate so they fail validation
fn parse_extra(digits: &str) -> u32 {
    if digits.is_empty() {
        1
    } else {
        digits.parse().unwrap_or(u32::MAX)
    }
}
