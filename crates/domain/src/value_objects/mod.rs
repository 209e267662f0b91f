//! Value objects - Immutable objects defined by their attributes

mod check;
mod dice;
mod outcome;
mod stat_table;

pub use check::{CheckInput, CheckResult, DamageResult};
pub use dice::{DiceExpression, DiceParseError, DiceRoll, MAX_DICE, MAX_FACES, MAX_MODIFIER};
pub use outcome::OutcomeState;
pub use stat_table::{ActorStatLine, StatTable};
