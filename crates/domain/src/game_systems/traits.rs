//! The rules-engine contract every tabletop system implements.
//!
//! Request-side code only ever sees `Arc<dyn RulesEngine>`; which system sits
//! behind it is decided once, at startup, by the registry.

use crate::ports::ActorModifiers;
use crate::value_objects::{CheckInput, CheckResult, DamageResult, OutcomeState};

/// Core trait all rule systems must implement.
///
/// Every method is synchronous and performs no I/O. Ordinary bad input never
/// fails: a missing difficulty uses the system baseline, a missing modifier
/// counts as zero, and a malformed dice expression rolls as zero.
pub trait RulesEngine: Send + Sync {
    /// Stable identifier for this system (e.g., "dnd5e", "pbta").
    fn name(&self) -> &str;

    /// Human-readable display name (e.g., "D&D 5th Edition").
    fn display_name(&self) -> &str;

    /// Rebind the session RNG. `Some(seed)` makes every later roll
    /// reproducible; `None` switches to a non-deterministic source.
    ///
    /// Nothing from the previous session carries over.
    fn init_session(&self, seed: Option<u64>);

    /// Resolve one check.
    ///
    /// The outcome depends only on the input, the caller's modifiers and the
    /// dice drawn. Tags may change `detail`, never `success`. Totals and
    /// margins saturate at the `i32` bounds instead of overflowing.
    fn ability_check(&self, input: &CheckInput, stats: &dyn ActorModifiers) -> CheckResult;

    /// Roll an `NdM+K` expression.
    ///
    /// Malformed expressions return `{ total: 0, breakdown: [] }` rather than
    /// an error.
    fn damage_roll(&self, expr: &str) -> DamageResult;

    /// Order actors for a combat round.
    ///
    /// Returns a permutation of `actor_ids`: same length, same ids, nothing
    /// added or dropped.
    fn turn_order(&self, actor_ids: &[String], stats: &dyn ActorModifiers) -> Vec<String>;

    /// Fold a resolved check into the caller's state and hand it back.
    fn apply_outcome(&self, result: &CheckResult, state: OutcomeState) -> OutcomeState;
}
