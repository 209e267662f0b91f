//! Powered by the Apocalypse rules engine.
//!
//! PbtA uses 2d6 + stat with move-based resolution.
//! Key features:
//! - Three-tier outcomes: 6- (miss), 7-9 (partial), 10+ (full success)
//! - No fixed difficulty; the tiers are the thresholds
//! - No initiative; the GM passes the spotlight
//!
//! Harm in PbtA games is narrative, but damage expressions still roll through
//! the generic `NdM+K` roller so both systems answer the same contract.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::session::SessionDice;
use super::traits::RulesEngine;
use crate::ports::{ActorModifiers, RngProvider};
use crate::value_objects::{CheckInput, CheckResult, DamageResult, OutcomeState};

/// PbtA roll outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PbtaTier {
    /// 6- - Miss, GM makes a move
    Miss,
    /// 7-9 - Partial success, you do it but with cost/complication
    Partial,
    /// 10+ - Full success, you do it
    Full,
}

impl PbtaTier {
    /// Determine the tier from a total (2d6 + stat).
    pub fn from_total(total: i32) -> Self {
        if total >= 10 {
            PbtaTier::Full
        } else if total >= 7 {
            PbtaTier::Partial
        } else {
            PbtaTier::Miss
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PbtaTier::Full | PbtaTier::Partial)
    }

    /// The total each tier measures its margin against.
    pub fn threshold(&self) -> i32 {
        match self {
            PbtaTier::Full => 10,
            PbtaTier::Partial => 7,
            PbtaTier::Miss => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PbtaTier::Miss => "miss",
            PbtaTier::Partial => "partial",
            PbtaTier::Full => "full",
        }
    }
}

impl fmt::Display for PbtaTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Powered by the Apocalypse rules engine.
pub struct PbtaSystem {
    dice: SessionDice,
}

impl PbtaSystem {
    pub const ID: &'static str = "pbta";
    pub const DISPLAY_NAME: &'static str = "Powered by the Apocalypse";

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

impl RulesEngine for PbtaSystem {
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
        let [a, b] = self.dice.roll_array::<2>(6);
        let roll_total = (a + b).saturating_add(modifier);
        let tier = PbtaTier::from_total(roll_total);

        let mut detail = format!("2d6({a}+{b}) + {modifier} => {tier}");
        if !input.tags.is_empty() {
            detail.push_str(&format!(" [{}]", input.tags.join(", ")));
        }

        CheckResult {
            success: tier.is_success(),
            roll_total,
            detail,
            margin: Some(roll_total.saturating_sub(tier.threshold())),
        }
    }

    fn damage_roll(&self, expr: &str) -> DamageResult {
        self.dice.roll_str(expr).into()
    }

    /// Spotlight order is the caller's; nothing is rolled.
    fn turn_order(&self, actor_ids: &[String], _stats: &dyn ActorModifiers) -> Vec<String> {
        actor_ids.to_vec()
    }

    fn apply_outcome(&self, result: &CheckResult, mut state: OutcomeState) -> OutcomeState {
        match PbtaTier::from_total(result.roll_total) {
            PbtaTier::Full => state.successes += 1,
            PbtaTier::Partial => {
                state.successes += 1;
                state.partials += 1;
            }
            PbtaTier::Miss => {
                state.failures += 1;
                state.gm_moves += 1;
            }
        }
        state.log.push(result.detail.clone());
        state
    }
}
