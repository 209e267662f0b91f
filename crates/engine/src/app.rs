//! Application state and composition.

use std::sync::Arc;

use chronicler_domain::{DomainError, RngProvider, RulesEngine, RulesEngineRegistry};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::random::SystemRngProvider;
use crate::use_cases::Mechanics;

/// Main application state.
///
/// Built once per process. The configured rule system is constructed here
/// and every consumer reaches it through `mechanics`.
pub struct App {
    pub config: AppConfig,
    pub registry: RulesEngineRegistry,
    pub rng: Arc<dyn RngProvider>,
    pub engine: Arc<dyn RulesEngine>,
    pub mechanics: Mechanics,
}

impl App {
    /// Compose the app with OS-backed randomness.
    pub fn new(config: AppConfig) -> Result<Self, DomainError> {
        Self::with_rng(config, Arc::new(SystemRngProvider::new()))
    }

    /// Compose the app with the given RNG provider.
    ///
    /// Fails when `config.game_system` names no registered system.
    pub fn with_rng(config: AppConfig, rng: Arc<dyn RngProvider>) -> Result<Self, DomainError> {
        let registry = RulesEngineRegistry::new();
        let engine = registry.build(&config.game_system, rng.clone())?;
        engine.init_session(config.dice_seed);

        tracing::info!(
            system = %engine.name(),
            display_name = %engine.display_name(),
            seed = ?config.dice_seed,
            "Rules engine ready"
        );

        Ok(Self {
            mechanics: Mechanics::new(engine.clone()),
            config,
            registry,
            rng,
            engine,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicler_domain::testing::ScriptedRngProvider;
    use chronicler_domain::CheckInput;

    #[test]
    fn composes_configured_system() {
        let config = AppConfig::default().with_game_system("PBTA");
        let app = App::with_rng(config, Arc::new(ScriptedRngProvider::new([3, 5])))
            .expect("pbta is registered");
        assert_eq!(app.engine.name(), "pbta");
        assert_eq!(app.mechanics.system_name(), "pbta");

        let outcome = app.mechanics.ability_check(&CheckInput::new("pc1"));
        assert_eq!(outcome.detail, "2d6(3+5) + 0 => partial");
    }

    #[test]
    fn default_config_uses_dnd5e() {
        let app = App::new(AppConfig::default()).expect("default system");
        assert_eq!(app.mechanics.system_name(), "dnd5e");
        assert_eq!(app.registry.list_systems(), vec!["dnd5e", "pbta"]);
    }

    #[test]
    fn unknown_system_fails_composition() {
        let config = AppConfig::default().with_game_system("gurps");
        let err = App::new(config).err().expect("gurps is unknown");
        assert!(matches!(err, DomainError::UnknownSystem { .. }));
        assert_eq!(
            err.to_string(),
            "Unknown rule system 'gurps' (known systems: dnd5e, pbta)"
        );
    }
}
