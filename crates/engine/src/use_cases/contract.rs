//! Contract conformance check for registered rule systems.
//!
//! Every system is built, seeded and driven through a fixed set of calls;
//! the results are checked against the laws every [`RulesEngine`] must obey.

use std::collections::HashMap;
use std::sync::Arc;

use chronicler_domain::{
    CheckInput, CheckResult, DamageResult, DiceExpression, DomainError, NoModifiers,
    RngProvider, RulesEngine, RulesEngineRegistry,
};
use serde::Serialize;

/// Seed every system is checked under.
pub const CONTRACT_SEED: u64 = 42;

const DAMAGE_EXPR: &str = "2d6+1";
const MALFORMED_EXPR: &str = "not-a-dice-expr";
const TURN_ORDER_IDS: [&str; 3] = ["a", "b", "c"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("System '{system}' could not be built: {source}")]
    Build {
        system: String,
        #[source]
        source: DomainError,
    },

    #[error("System '{system}' returned an empty check detail")]
    EmptyDetail { system: String },

    #[error("System '{system}' is not reproducible under seed {seed}")]
    NotReproducible { system: String, seed: u64 },

    #[error(
        "System '{system}' rolled '{expr}' as {total} with breakdown {breakdown:?}, which breaks NdM+K arithmetic"
    )]
    DamageArithmetic {
        system: String,
        expr: String,
        total: i32,
        breakdown: Vec<i32>,
    },

    #[error("System '{system}' rolled malformed expression '{expr}' as {total}")]
    MalformedDamage {
        system: String,
        expr: String,
        total: i32,
    },

    #[error("System '{system}' turn order {order:?} is not a permutation of {input:?}")]
    TurnOrder {
        system: String,
        input: Vec<String>,
        order: Vec<String>,
    },
}

/// What one system produced while passing the check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractReport {
    pub system: String,
    pub check: CheckResult,
    pub damage: DamageResult,
    pub turn_order: Vec<String>,
}

/// Build and verify every system in the registry, stopping at the first
/// violation.
pub fn verify_all(
    registry: &RulesEngineRegistry,
    provider: Arc<dyn RngProvider>,
) -> Result<Vec<ContractReport>, ContractViolation> {
    let mut reports = Vec::new();
    for system in registry.list_systems() {
        let engine = registry
            .build(system, provider.clone())
            .map_err(|source| ContractViolation::Build {
                system: system.to_string(),
                source,
            })?;
        let report = verify_system(engine.as_ref())?;
        tracing::info!(system = %report.system, "Rules engine satisfies the contract");
        reports.push(report);
    }
    Ok(reports)
}

/// Verify a single engine. The engine is reseeded with [`CONTRACT_SEED`].
pub fn verify_system(engine: &dyn RulesEngine) -> Result<ContractReport, ContractViolation> {
    let system = engine.name().to_string();
    let input = CheckInput::new("pc1")
        .with_skill("athletics")
        .with_difficulty(12)
        .with_tag("test");

    engine.init_session(Some(CONTRACT_SEED));
    let check = engine.ability_check(&input, &NoModifiers);
    if check.detail.trim().is_empty() {
        return Err(ContractViolation::EmptyDetail { system });
    }

    engine.init_session(Some(CONTRACT_SEED));
    if engine.ability_check(&input, &NoModifiers) != check {
        return Err(ContractViolation::NotReproducible {
            system,
            seed: CONTRACT_SEED,
        });
    }

    let damage = engine.damage_roll(DAMAGE_EXPR);
    if !obeys_arithmetic(DAMAGE_EXPR, &damage) {
        return Err(ContractViolation::DamageArithmetic {
            system,
            expr: DAMAGE_EXPR.to_string(),
            total: damage.total,
            breakdown: damage.breakdown,
        });
    }

    let malformed = engine.damage_roll(MALFORMED_EXPR);
    if malformed != DamageResult::default() {
        return Err(ContractViolation::MalformedDamage {
            system,
            expr: MALFORMED_EXPR.to_string(),
            total: malformed.total,
        });
    }

    let ids: Vec<String> = TURN_ORDER_IDS.iter().map(|id| id.to_string()).collect();
    let turn_order = engine.turn_order(&ids, &NoModifiers);
    if !is_permutation(&ids, &turn_order) {
        return Err(ContractViolation::TurnOrder {
            system,
            input: ids,
            order: turn_order,
        });
    }

    Ok(ContractReport {
        system,
        check,
        damage,
        turn_order,
    })
}

fn obeys_arithmetic(expr: &str, damage: &DamageResult) -> bool {
    let Ok(parsed) = DiceExpression::parse(expr) else {
        return damage == &DamageResult::default();
    };
    damage.breakdown.len() == parsed.count as usize
        && damage
            .breakdown
            .iter()
            .all(|&face| (1..=parsed.faces as i32).contains(&face))
        && damage.total == damage.breakdown.iter().sum::<i32>() + parsed.modifier
}

fn is_permutation(input: &[String], order: &[String]) -> bool {
    if input.len() != order.len() {
        return false;
    }
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for id in input {
        *counts.entry(id.as_str()).or_default() += 1;
    }
    for id in order {
        *counts.entry(id.as_str()).or_default() -= 1;
    }
    counts.values().all(|&n| n == 0)
}
