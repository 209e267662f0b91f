//! Narrator output flowing through roll resolution.

use chronicler_domain::NoModifiers;

use super::*;
use crate::use_cases::narration::{process_narration, ResolvedRoll};

const NARRATION: &str = r#"The rope bridge sways as the ogre charges.

<ability_check>{"actorId": "fighter", "skill": "athletics", "difficulty": 13}</ability_check>

Its club comes down hard.
<damage_roll>2d8+3</damage_roll>
<ability_check>{"actorId": "rogue", "skill": "stealth", "tags": ["controlled"]}</ability_check>"#;

#[test]
fn narration_resolves_and_strips() {
    let app = seeded_app("dnd5e", E2E_SEED);
    let processed = process_narration(NARRATION, &app.mechanics, &party_stats());

    assert_eq!(
        processed.text,
        "The rope bridge sways as the ogre charges.\n\nIts club comes down hard."
    );
    assert_eq!(processed.rolls.len(), 3);

    match &processed.rolls[0] {
        ResolvedRoll::AbilityCheck { input, outcome } => {
            assert_eq!(input.actor_id, "fighter");
            assert!(outcome.detail.contains("+ 5 vs DC 13"));
            assert_eq!(outcome.success, outcome.result >= 13);
        }
        other => panic!("expected ability check, got {other:?}"),
    }
    match &processed.rolls[1] {
        ResolvedRoll::DamageRoll { expr, result } => {
            assert_eq!(expr, "2d8+3");
            assert_eq!(result.breakdown.len(), 2);
            assert_eq!(result.total, result.breakdown.iter().sum::<i32>() + 3);
        }
        other => panic!("expected damage roll, got {other:?}"),
    }

    let lines: Vec<&str> = processed.summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("fighter athletics check: 1d20("));
    assert!(lines[1].starts_with("damage 2d8+3: "));
    assert!(lines[2].starts_with("rogue stealth check: "));
}

#[test]
fn narration_is_reproducible_under_seed() {
    let first = process_narration(
        NARRATION,
        &seeded_app("pbta", E2E_SEED).mechanics,
        &NoModifiers,
    );
    let second = process_narration(
        NARRATION,
        &seeded_app("pbta", E2E_SEED).mechanics,
        &NoModifiers,
    );
    assert_eq!(first, second);
}

#[test]
fn pbta_tags_show_in_summary() {
    let app = seeded_app("pbta", E2E_SEED);
    let processed = process_narration(NARRATION, &app.mechanics, &NoModifiers);
    let last = processed.summary.lines().last().expect("three lines");
    assert!(last.contains("[controlled]"));
}

#[test]
fn plain_narration_passes_through() {
    let app = seeded_app("dnd5e", E2E_SEED);
    let processed = process_narration("  The tavern is quiet.  ", &app.mechanics, &NoModifiers);
    assert_eq!(processed.text, "The tavern is quiet.");
    assert!(processed.rolls.is_empty());
    assert!(processed.summary.is_empty());
}
