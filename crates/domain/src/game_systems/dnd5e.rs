//! D&D 5th Edition rules engine.
//!
//! d20 resolution: one twenty-sided die plus the actor's modifier against a
//! difficulty class. Initiative is 1d20 + DEX, highest first.

use std::sync::Arc;

use super::session::SessionDice;
use super::traits::RulesEngine;
use crate::ports::{ActorModifiers, RngProvider};
use crate::value_objects::{CheckInput, CheckResult, DamageResult, OutcomeState};

/// DC used when a check names none.
pub const DEFAULT_DC: i32 = 10;

/// D&D 5th Edition rules engine.
pub struct Dnd5eSystem {
    dice: SessionDice,
}

impl Dnd5eSystem {
    pub const ID: &'static str = "dnd5e";
    pub const DISPLAY_NAME: &'static str = "D&D 5th Edition";

    /// Create an unseeded engine rolling with `rng`.
    pub fn new(rng: Arc<dyn RngProvider>) -> Self {
        Self {
            dice: SessionDice::new(rng),
        }
    }

    /// Registry constructor.
    pub fn construct(rng: Arc<dyn RngProvider>) -> Arc<dyn RulesEngine> {
        Arc::new(Self::new(rng))
    }
}

impl RulesEngine for Dnd5eSystem {
    fn name(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }

    fn init_session(&self, seed: Option<u64>) {
        self.dice.reseed(seed);
    }

    fn ability_check(&self, input: &CheckInput, stats: &dyn ActorModifiers) -> CheckResult {
        let modifier = stats.check_modifier(input).unwrap_or(0);
        let dc = input.difficulty.unwrap_or(DEFAULT_DC);
        let [natural] = self.dice.roll_array::<1>(20);
        let roll_total = natural.saturating_add(modifier);

        CheckResult {
            success: roll_total >= dc,
            roll_total,
            detail: format!("1d20({natural}) + {modifier} vs DC {dc}"),
            margin: Some(roll_total.saturating_sub(dc)),
        }
    }

    fn damage_roll(&self, expr: &str) -> DamageResult {
        self.dice.roll_str(expr).into()
    }

    fn turn_order(&self, actor_ids: &[String], stats: &dyn ActorModifiers) -> Vec<String> {
        // (input position, initiative total, initiative modifier)
        let mut rolls: Vec<(usize, i32, i32)> = actor_ids
            .iter()
            .enumerate()
            .map(|(position, id)| {
                let modifier = stats.initiative_modifier(id).unwrap_or(0);
                let [natural] = self.dice.roll_array::<1>(20);
                (position, natural.saturating_add(modifier), modifier)
            })
            .collect();

        // Stable: full ties keep the caller's order.
        rolls.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));

        rolls
            .into_iter()
            .map(|(position, _, _)| actor_ids[position].clone())
            .collect()
    }

    fn apply_outcome(&self, result: &CheckResult, mut state: OutcomeState) -> OutcomeState {
        if result.success {
            state.successes += 1;
        } else {
            state.failures += 1;
        }
        state.log.push(result.detail.clone());
        state
    }
}
