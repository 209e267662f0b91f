//! Rule system implementations for tabletop play.
//!
//! Each system implements the [`RulesEngine`] contract defined in `traits.rs`.
//! The [`RulesEngineRegistry`] maps a configured system identifier to a
//! constructed engine; this happens once per process.
//!
//! # Supported Systems
//!
//! - D&D 5th Edition (`dnd5e`)
//! - Powered by the Apocalypse (`pbta`)

mod dnd5e;
mod pbta;
mod session;
mod traits;

pub use dnd5e::{Dnd5eSystem, DEFAULT_DC as DND5E_DEFAULT_DC};
pub use pbta::{PbtaSystem, PbtaTier};
pub use session::SessionDice;
pub use traits::RulesEngine;

use std::sync::Arc;

use crate::error::DomainError;
use crate::ports::RngProvider;

/// System used when configuration names none.
pub const DEFAULT_SYSTEM: &str = Dnd5eSystem::ID;

/// Builds an engine bound to the given RNG provider.
pub type EngineConstructor = fn(Arc<dyn RngProvider>) -> Arc<dyn RulesEngine>;

struct RegisteredSystem {
    id: String,
    display_name: String,
    construct: EngineConstructor,
}

/// Registry of available rule systems.
pub struct RulesEngineRegistry {
    systems: Vec<RegisteredSystem>,
}

impl Default for RulesEngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngineRegistry {
    /// Create a new registry with all built-in systems.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.systems.push(RegisteredSystem {
            id: Dnd5eSystem::ID.to_string(),
            display_name: Dnd5eSystem::DISPLAY_NAME.to_string(),
            construct: Dnd5eSystem::construct,
        });
        registry.systems.push(RegisteredSystem {
            id: PbtaSystem::ID.to_string(),
            display_name: PbtaSystem::DISPLAY_NAME.to_string(),
            construct: PbtaSystem::construct,
        });
        registry
    }

    /// Create an empty registry without built-in systems.
    pub fn empty() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Register a rule system.
    ///
    /// Identifiers are stored lowercase and must be unique.
    pub fn register(
        &mut self,
        system_id: &str,
        display_name: impl Into<String>,
        construct: EngineConstructor,
    ) -> Result<(), DomainError> {
        let id = normalize(system_id);
        if id.is_empty() {
            return Err(DomainError::validation("system id cannot be empty"));
        }
        if self.contains(&id) {
            return Err(DomainError::validation(format!(
                "system '{id}' is already registered"
            )));
        }
        self.systems.push(RegisteredSystem {
            id,
            display_name: display_name.into(),
            construct,
        });
        Ok(())
    }

    pub fn contains(&self, system_id: &str) -> bool {
        self.find(system_id).is_some()
    }

    /// Construct the engine for `system_id`.
    ///
    /// Matching ignores case and surrounding whitespace. An unknown id is an
    /// error; there is no fallback system.
    pub fn build(
        &self,
        system_id: &str,
        rng: Arc<dyn RngProvider>,
    ) -> Result<Arc<dyn RulesEngine>, DomainError> {
        let system = self
            .find(system_id)
            .ok_or_else(|| DomainError::unknown_system(system_id.trim(), self.list_systems()))?;
        Ok((system.construct)(rng))
    }

    /// List all registered system IDs.
    pub fn list_systems(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.id.as_str()).collect()
    }

    /// List all registered systems with their display names.
    pub fn list_systems_with_names(&self) -> Vec<(&str, &str)> {
        self.systems
            .iter()
            .map(|s| (s.id.as_str(), s.display_name.as_str()))
            .collect()
    }

    fn find(&self, system_id: &str) -> Option<&RegisteredSystem> {
        let id = normalize(system_id);
        self.systems.iter().find(|s| s.id == id)
    }
}

fn normalize(system_id: &str) -> String {
    system_id.trim().to_lowercase()
}
