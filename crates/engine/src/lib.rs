//! Chronicler Engine library.
//!
//! Composes the configured rule system and exposes it to request-side code.
//!
//! ## Structure
//!
//! - `infrastructure/` - Configuration and RNG adapters for the domain ports
//! - `use_cases/` - Mechanics facade, narrator roll requests, contract check, benchmark
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// E2E tests against the composed app with real randomness.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
pub use infrastructure::config::{AppConfig, ConfigError};
