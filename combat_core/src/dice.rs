//! Dice notation (`NdS`, `NdS+B`, `NdS-B`)

use crate::rng::Roller;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Dice notation parse error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("Empty dice expression")]
    Empty,
    #[error("Missing 'd' separator in dice expression '{0}'")]
    MissingSeparator(String),
    #[error("Invalid number '{0}' in dice expression")]
    InvalidNumber(String),
    #[error("Dice expression '{0}' needs at least one die with at least one side")]
    NoDice(String),
    #[error("Dice expression '{0}' exceeds 1000 dice or 1000 sides")]
    TooLarge(String),
}

/// Largest die count accepted by the parser
pub const MAX_DICE: u32 = 1000;
/// Largest die size accepted by the parser
pub const MAX_SIDES: u32 = 1000;

/// A dice expression such as `2d4+1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub bonus: i32,
}

impl DiceExpr {
    pub fn new(count: u32, sides: u32, bonus: i32) -> Self {
        DiceExpr { count, sides, bonus }
    }

    /// Lowest possible total (never below 0)
    pub fn min(&self) -> i32 {
        self.count_i32().saturating_add(self.bonus).max(0)
    }

    /// Highest possible total (never below 0)
    pub fn max(&self) -> i32 {
        self.count_i32()
            .saturating_mul(self.sides_i32())
            .saturating_add(self.bonus)
            .max(0)
    }

    /// Roll the expression, one `randint` per die. Totals floor at 0.
    pub fn roll(&self, rng: &mut impl Roller) -> i32 {
        let mut total = self.bonus;
        for _ in 0..self.count {
            total = total.saturating_add(rng.roll_die(self.sides_i32()));
        }
        total.max(0)
    }

    fn count_i32(&self) -> i32 {
        i32::try_from(self.count).unwrap_or(i32::MAX)
    }

    fn sides_i32(&self) -> i32 {
        i32::try_from(self.sides).unwrap_or(i32::MAX)
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.bonus {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{}", b),
            b => write!(f, "{}", b),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        if text.is_empty() {
            return Err(DiceError::Empty);
        }

        let (count_part, rest) = text
            .split_once('d')
            .ok_or_else(|| DiceError::MissingSeparator(text.clone()))?;

        // "d6" is shorthand for "1d6"
        let count = if count_part.is_empty() {
            1
        } else {
            parse_number::<u32>(count_part)?
        };

        let (sides_part, bonus) = if let Some((sides, bonus)) = rest.split_once('+') {
            (sides, parse_number::<i32>(bonus)?)
        } else if let Some((sides, bonus)) = rest.split_once('-') {
            (sides, -parse_number::<i32>(bonus)?)
        } else {
            (rest, 0)
        };
        let sides = parse_number::<u32>(sides_part)?;

        if count == 0 || sides == 0 {
            return Err(DiceError::NoDice(text));
        }
        if count > MAX_DICE || sides > MAX_SIDES {
            return Err(DiceError::TooLarge(text));
        }

        Ok(DiceExpr { count, sides, bonus })
    }
}

impl TryFrom<String> for DiceExpr {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiceExpr> for String {
    fn from(dice: DiceExpr) -> Self {
        dice.to_string()
    }
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, DiceError> {
    s.trim()
        .parse::<T>()
        .map_err(|_| DiceError::InvalidNumber(s.to_string()))
}
