//! Helpers for constructing seeded apps.

use chronicler_domain::StatTable;

use crate::app::App;
use crate::infrastructure::config::AppConfig;

/// Seed shared by reproducibility tests.
pub const E2E_SEED: u64 = 42;

/// Compose an app for `system` with a fixed seed and real randomness.
pub fn seeded_app(system: &str, seed: u64) -> App {
    let config = AppConfig::default()
        .with_game_system(system)
        .with_dice_seed(Some(seed));
    App::new(config).expect("system should be registered")
}

/// A small party and two foes.
pub fn party_stats() -> StatTable {
    StatTable::new()
        .with_base("fighter", 2)
        .with_skill("fighter", "athletics", 5)
        .with_initiative("fighter", 1)
        .with_base("rogue", 1)
        .with_skill("rogue", "stealth", 7)
        .with_initiative("rogue", 4)
        .with_initiative("goblin", 2)
        .with_initiative("ogre", -1)
}

pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
