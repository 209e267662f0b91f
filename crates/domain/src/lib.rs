//! Chronicler domain: dice, check value objects and the pluggable rules engines.
//!
//! Nothing in this crate performs I/O or owns a random number generator.
//! Randomness comes in through [`RngProvider`], actor data through
//! [`ActorModifiers`].

pub mod error;
pub mod game_systems;
pub mod ports;
pub mod value_objects;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::DomainError;

// Re-export rule system traits and types
pub use game_systems::{
    Dnd5eSystem, EngineConstructor, PbtaSystem, PbtaTier, RulesEngine, RulesEngineRegistry,
    SessionDice, DEFAULT_SYSTEM, DND5E_DEFAULT_DC,
};

pub use ports::{ActorModifiers, DiceRng, NoModifiers, RngProvider};

pub use value_objects::{
    ActorStatLine, CheckInput, CheckResult, DamageResult, DiceExpression, DiceParseError,
    DiceRoll, OutcomeState, StatTable,
};
