//! Dice expression parsing and rolling
//!
//! Supports expressions like "1d20", "2d6+1", "3D8-2". Whitespace anywhere in
//! the expression is ignored.
//!
//! Two entry points exist on purpose:
//! - [`DiceExpression::parse`] is strict and reports why a string was rejected.
//! - [`DiceExpression::roll_str`] is permissive: anything that does not parse
//!   rolls as the empty result `{ total: 0, parts: [] }`. Dice text often comes
//!   from players or from the LLM, and a formatting slip must not abort a turn.

use std::fmt;
use thiserror::Error;

use crate::ports::DiceRng;

/// Upper bound on dice in one expression.
pub const MAX_DICE: u32 = 1_000;
/// Upper bound on faces per die.
pub const MAX_FACES: u32 = 10_000;
/// Upper bound on the absolute flat modifier.
pub const MAX_MODIFIER: i32 = 1_000_000;

/// Error when parsing a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The expression string is empty
    #[error("Empty dice expression")]
    Empty,
    /// Invalid format - expected NdM, NdM+K or NdM-K
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Die size must be at least 1
    #[error("Die size must be between 1 and {MAX_FACES}")]
    InvalidDieSize,
    /// Too many dice in one expression
    #[error("Cannot roll {0} dice (limit {MAX_DICE})")]
    TooManyDice(u32),
    /// A number does not fit its allowed range
    #[error("Number out of range: '{0}'")]
    OutOfRange(String),
}

/// A parsed dice expression like "2d6+3"
///
/// Only [`DiceExpression::parse`] builds one, so every value is within the
/// parse limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceExpression {
    /// Number of dice to roll (N in NdM)
    pub count: u32,
    /// Faces on each die (M in NdM)
    pub faces: u32,
    /// Flat modifier added after rolling (+K or -K)
    pub modifier: i32,
}

impl DiceExpression {
    fn new(count: u32, faces: u32, modifier: i32) -> Self {
        Self {
            count,
            faces,
            modifier,
        }
    }

    /// Parse an expression matching `NdM`, `NdM+K` or `NdM-K`.
    ///
    /// `d` may be upper or lower case and whitespace is ignored. `N` may be
    /// zero (the roll is then just the modifier); `M` may not.
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let d_pos = compact
            .find(|c: char| c == 'd' || c == 'D')
            .ok_or_else(|| DiceParseError::InvalidFormat(compact.clone()))?;

        let count = parse_digits(&compact[..d_pos], &compact)?;
        let after_d = &compact[d_pos + 1..];

        let (faces_str, modifier) = match after_d.find(|c: char| c == '+' || c == '-') {
            Some(sign_pos) => {
                let magnitude = parse_digits(&after_d[sign_pos + 1..], &compact)?;
                let magnitude = i32::try_from(magnitude)
                    .ok()
                    .filter(|m| *m <= MAX_MODIFIER)
                    .ok_or_else(|| DiceParseError::OutOfRange(after_d[sign_pos..].to_string()))?;
                let modifier = if after_d[sign_pos..].starts_with('-') {
                    -magnitude
                } else {
                    magnitude
                };
                (&after_d[..sign_pos], modifier)
            }
            None => (after_d, 0),
        };

        let faces = parse_digits(faces_str, &compact)?;
        if faces == 0 || faces > MAX_FACES {
            return Err(DiceParseError::InvalidDieSize);
        }
        if count > MAX_DICE {
            return Err(DiceParseError::TooManyDice(count));
        }

        Ok(Self::new(count, faces, modifier))
    }

    /// Roll the expression with the given source.
    pub fn roll(&self, rng: &mut dyn DiceRng) -> DiceRoll {
        let parts: Vec<i32> = (0..self.count)
            .map(|_| rng.roll_die(self.faces) as i32)
            .collect();
        let total = parts.iter().sum::<i32>() + self.modifier;
        DiceRoll { total, parts }
    }

    /// Parse and roll, yielding [`DiceRoll::empty`] for malformed input.
    ///
    /// This never fails. Callers that must reject bad text call
    /// [`DiceExpression::parse`] first.
    pub fn roll_str(input: &str, rng: &mut dyn DiceRng) -> DiceRoll {
        match Self::parse(input) {
            Ok(expr) => expr.roll(rng),
            Err(_) => DiceRoll::empty(),
        }
    }
}

/// Digits only, at least one; anything else is a format error.
fn parse_digits(digits: &str, whole: &str) -> Result<u32, DiceParseError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DiceParseError::InvalidFormat(whole.to_string()));
    }
    digits
        .parse()
        .map_err(|_| DiceParseError::OutOfRange(digits.to_string()))
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.count, self.faces),
            m if m > 0 => write!(f, "{}d{}+{}", self.count, self.faces, m),
            m => write!(f, "{}d{}{}", self.count, self.faces, m),
        }
    }
}

impl std::str::FromStr for DiceExpression {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Result of rolling an expression
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiceRoll {
    /// Dice sum plus modifier
    pub total: i32,
    /// Individual die faces in roll order
    pub parts: Vec<i32>,
}

impl DiceRoll {
    /// The defined result for malformed expressions.
    pub fn empty() -> Self {
        Self::default()
    }
}
