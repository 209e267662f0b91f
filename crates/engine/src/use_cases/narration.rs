//! Roll requests embedded in narrator output.
//!
//! The narrator asks for mechanics with two tags:
//! - `<ability_check>{"actorId": "pc1", "skill": "athletics", "difficulty": 12}</ability_check>`
//! - `<damage_roll>2d6+1</damage_roll>`
//!
//! Requests are resolved through [`Mechanics`], the tags are stripped from the
//! player-facing text, and a one-line-per-roll summary is fed to the next
//! prompt.

use std::sync::LazyLock;

use chronicler_domain::{ActorModifiers, CheckInput, DamageResult};
use regex_lite::Regex;
use serde::Serialize;

use super::mechanics::{CheckOutcome, Mechanics};

static ROLL_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<ability_check>(.*?)</ability_check>|<damage_roll>(.*?)</damage_roll>")
        .expect("valid regex")
});

// Blank lines left behind once tags are removed
static EXTRA_BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n(\s*\n)+").expect("valid regex"));

/// A roll the narrator asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RollRequest {
    AbilityCheck(CheckInput),
    DamageRoll { expr: String },
}

/// A roll request together with its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedRoll {
    AbilityCheck {
        input: CheckInput,
        outcome: CheckOutcome,
    },
    DamageRoll {
        expr: String,
        result: DamageResult,
    },
}

/// Narrator output after its roll requests were resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedNarration {
    /// Text shown to players, without roll tags
    pub text: String,
    pub rolls: Vec<ResolvedRoll>,
    /// Roll results for the next prompt
    pub summary: String,
}

/// Extract roll requests in order of appearance.
///
/// An ability check whose payload is not valid JSON, or lacks an actor id, is
/// skipped with a warning. So is an empty damage expression.
pub fn parse_roll_requests(raw: &str) -> Vec<RollRequest> {
    let mut requests = Vec::new();

    for caps in ROLL_TAG_RE.captures_iter(raw) {
        if let Some(payload) = caps.get(1) {
            match serde_json::from_str::<CheckInput>(payload.as_str().trim()) {
                Ok(input) if !input.actor_id.trim().is_empty() => {
                    requests.push(RollRequest::AbilityCheck(input));
                }
                Ok(_) => {
                    tracing::warn!(
                        payload = %payload.as_str(),
                        "Ability check request has no actor id"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        payload = %payload.as_str(),
                        "Failed to parse ability check request"
                    );
                }
            }
        } else if let Some(expr) = caps.get(2) {
            let expr = expr.as_str().trim();
            if expr.is_empty() {
                tracing::warn!("Empty damage roll request");
                continue;
            }
            requests.push(RollRequest::DamageRoll {
                expr: expr.to_string(),
            });
        }
    }

    requests
}

/// Run every request through the active rules engine.
pub fn resolve_roll_requests(
    mechanics: &Mechanics,
    requests: &[RollRequest],
    stats: &dyn ActorModifiers,
) -> Vec<ResolvedRoll> {
    requests
        .iter()
        .map(|request| match request {
            RollRequest::AbilityCheck(input) => ResolvedRoll::AbilityCheck {
                outcome: mechanics.ability_check_with(input, stats),
                input: input.clone(),
            },
            RollRequest::DamageRoll { expr } => ResolvedRoll::DamageRoll {
                result: mechanics.damage_roll(expr),
                expr: expr.clone(),
            },
        })
        .collect()
}

/// Remove roll tags from player-facing text.
pub fn strip_roll_tags(raw: &str) -> String {
    let stripped = ROLL_TAG_RE.replace_all(raw, "");
    EXTRA_BLANK_LINES_RE
        .replace_all(&stripped, "\n\n")
        .trim()
        .to_string()
}

/// Render one line per resolved roll.
pub fn summarize(resolved: &[ResolvedRoll]) -> String {
    resolved
        .iter()
        .map(|roll| match roll {
            ResolvedRoll::AbilityCheck { input, outcome } => {
                let verdict = if outcome.success { "success" } else { "failure" };
                match input.skill.as_deref() {
                    Some(skill) => format!(
                        "{} {} check: {} ({verdict})",
                        input.actor_id, skill, outcome.detail
                    ),
                    None => format!("{} check: {} ({verdict})", input.actor_id, outcome.detail),
                }
            }
            ResolvedRoll::DamageRoll { expr, result } => {
                format!("damage {expr}: {} {:?}", result.total, result.breakdown)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse, resolve, strip and summarize in one pass.
pub fn process_narration(
    raw: &str,
    mechanics: &Mechanics,
    stats: &dyn ActorModifiers,
) -> ProcessedNarration {
    let requests = parse_roll_requests(raw);
    let rolls = resolve_roll_requests(mechanics, &requests, stats);
    if !rolls.is_empty() {
        tracing::debug!(
            system = %mechanics.system_name(),
            rolls = rolls.len(),
            "Resolved narrator roll requests"
        );
    }

    ProcessedNarration {
        text: strip_roll_tags(raw),
        summary: summarize(&rolls),
        rolls,
    }
}
