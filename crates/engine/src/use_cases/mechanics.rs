//! Mechanics facade.
//!
//! Request handlers resolve dice mechanics through [`Mechanics`] only. It
//! forwards to whichever rules engine the process was configured with and
//! reshapes the results; it never looks at which system that is.

use std::sync::Arc;

use chronicler_domain::{
    ActorModifiers, CheckInput, CheckResult, DamageResult, NoModifiers, OutcomeState, RulesEngine,
};
use serde::{Deserialize, Serialize};

/// Check result as handed to request handlers and the narrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub success: bool,
    /// Final roll total
    pub result: i32,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<i32>,
}

impl From<CheckResult> for CheckOutcome {
    fn from(result: CheckResult) -> Self {
        Self {
            success: result.success,
            result: result.roll_total,
            detail: result.detail,
            margin: result.margin,
        }
    }
}

#[derive(Clone)]
pub struct Mechanics {
    engine: Arc<dyn RulesEngine>,
}

impl Mechanics {
    pub fn new(engine: Arc<dyn RulesEngine>) -> Self {
        Self { engine }
    }

    pub fn system_name(&self) -> &str {
        self.engine.name()
    }

    pub fn display_name(&self) -> &str {
        self.engine.display_name()
    }

    /// Check with no actor data; every modifier is 0.
    pub fn ability_check(&self, input: &CheckInput) -> CheckOutcome {
        self.ability_check_with(input, &NoModifiers)
    }

    pub fn ability_check_with(
        &self,
        input: &CheckInput,
        stats: &dyn ActorModifiers,
    ) -> CheckOutcome {
        self.engine.ability_check(input, stats).into()
    }

    /// Raw engine result, for callers that feed it back into
    /// [`Mechanics::apply_outcome`].
    pub fn resolve_check(&self, input: &CheckInput, stats: &dyn ActorModifiers) -> CheckResult {
        self.engine.ability_check(input, stats)
    }

    /// Malformed expressions roll zero with an empty breakdown.
    pub fn damage_roll(&self, expr: &str) -> DamageResult {
        self.engine.damage_roll(expr)
    }

    pub fn damage_total(&self, expr: &str) -> i32 {
        self.engine.damage_roll(expr).total
    }

    pub fn turn_order(&self, actor_ids: &[String]) -> Vec<String> {
        self.turn_order_with(actor_ids, &NoModifiers)
    }

    pub fn turn_order_with(&self, actor_ids: &[String], stats: &dyn ActorModifiers) -> Vec<String> {
        self.engine.turn_order(actor_ids, stats)
    }

    pub fn apply_outcome(&self, result: &CheckResult, state: OutcomeState) -> OutcomeState {
        self.engine.apply_outcome(result, state)
    }

    pub fn reseed(&self, seed: Option<u64>) {
        tracing::info!(
            system = %self.engine.name(),
            seed = ?seed,
            "Reseeding rules engine session"
        );
        self.engine.init_session(seed);
    }
}
