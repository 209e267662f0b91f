//! Application configuration

use std::env;

use chronicler_domain::DEFAULT_SYSTEM;

/// Benchmark iteration count when `BENCH_ITERATIONS` is unset.
pub const DEFAULT_BENCH_ITERATIONS: u32 = 10_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Rule system identifier (`GAME_SYSTEM`)
    pub game_system: String,
    /// Session seed (`DICE_SEED`); `None` seeds from entropy
    pub dice_seed: Option<u64>,
    /// Default iteration count for `bench` (`BENCH_ITERATIONS`)
    pub bench_iterations: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game_system: DEFAULT_SYSTEM.to_string(),
            dice_seed: None,
            bench_iterations: DEFAULT_BENCH_ITERATIONS,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let game_system = var("GAME_SYSTEM").unwrap_or_else(|| DEFAULT_SYSTEM.to_string());

        let dice_seed = var("DICE_SEED")
            .map(|value| parse_number::<u64>("DICE_SEED", value))
            .transpose()?;

        let bench_iterations = match var("BENCH_ITERATIONS") {
            Some(value) => {
                let iterations = parse_number::<u32>("BENCH_ITERATIONS", value.clone())?;
                if iterations == 0 {
                    return Err(ConfigError::InvalidValue {
                        var: "BENCH_ITERATIONS",
                        value,
                        reason: "must be at least 1".to_string(),
                    });
                }
                iterations
            }
            None => DEFAULT_BENCH_ITERATIONS,
        };

        Ok(Self {
            game_system,
            dice_seed,
            bench_iterations,
        })
    }

    pub fn with_game_system(mut self, game_system: impl Into<String>) -> Self {
        self.game_system = game_system.into();
        self
    }

    pub fn with_dice_seed(mut self, seed: Option<u64>) -> Self {
        self.dice_seed = seed;
        self
    }
}

fn parse_number<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("valid config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.game_system, "dnd5e");
        assert_eq!(config.dice_seed, None);
        assert_eq!(config.bench_iterations, 10_000);
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GAME_SYSTEM", "pbta"),
            ("DICE_SEED", " 42 "),
            ("BENCH_ITERATIONS", "500"),
        ]))
        .expect("valid config");
        assert_eq!(config.game_system, "pbta");
        assert_eq!(config.dice_seed, Some(42));
        assert_eq!(config.bench_iterations, 500);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("GAME_SYSTEM", "  "), ("DICE_SEED", "")]))
            .expect("valid config");
        assert_eq!(config.game_system, DEFAULT_SYSTEM);
        assert_eq!(config.dice_seed, None);
    }

    #[test]
    fn invalid_seed_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("DICE_SEED", "forty-two")]))
            .expect_err("seed must be numeric");
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: "DICE_SEED", ref value, .. } if value == "forty-two"
        ));
        assert!(err.to_string().starts_with("DICE_SEED has invalid value 'forty-two'"));
    }

    #[test]
    fn zero_iterations_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("BENCH_ITERATIONS", "0")]))
            .expect_err("zero iterations");
        assert!(err.to_string().contains("must be at least 1"));
    }

    #[test]
    fn unknown_system_is_not_validated_here() {
        // The registry owns the list of systems.
        let config =
            AppConfig::from_lookup(lookup(&[("GAME_SYSTEM", "gurps")])).expect("valid config");
        assert_eq!(config.game_system, "gurps");
    }

    #[test]
    fn overrides() {
        let config = AppConfig::default()
            .with_game_system("pbta")
            .with_dice_seed(Some(7));
        assert_eq!(config.game_system, "pbta");
        assert_eq!(config.dice_seed, Some(7));
    }
}
