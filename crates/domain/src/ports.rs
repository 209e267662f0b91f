//! Ports the rules engines depend on.
//!
//! The domain never owns a random number generator or actor storage. Both are
//! injected: randomness through [`RngProvider`]/[`DiceRng`] (bound once per
//! session), actor modifiers through [`ActorModifiers`] (passed per call).

use crate::value_objects::CheckInput;

/// A source of die faces.
pub trait DiceRng: Send {
    /// Roll one die. Implementations must return a value in `1..=faces`.
    fn roll_die(&mut self, faces: u32) -> u32;
}

/// Creates the per-session [`DiceRng`] an engine rolls with.
///
/// `seed: None` asks for a non-deterministic source. The same seed must
/// always produce the same sequence of faces.
pub trait RngProvider: Send + Sync {
    fn session_rng(&self, seed: Option<u64>) -> Box<dyn DiceRng>;
}

/// Caller-supplied actor stat lookup.
///
/// Returning `None` means "no data"; engines treat that as a zero modifier.
#[cfg_attr(test, mockall::automock)]
pub trait ActorModifiers: Send + Sync {
    /// Modifier applied to an ability/skill check.
    fn check_modifier(&self, input: &CheckInput) -> Option<i32>;

    /// Modifier applied to an initiative roll (DEX for d20 systems).
    fn initiative_modifier(&self, actor_id: &str) -> Option<i32>;
}

/// Lookup that knows nothing about any actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModifiers;

impl ActorModifiers for NoModifiers {
    fn check_modifier(&self, _input: &CheckInput) -> Option<i32> {
        None
    }

    fn initiative_modifier(&self, _actor_id: &str) -> Option<i32> {
        None
    }
}
