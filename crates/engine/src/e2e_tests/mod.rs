//! End-to-end tests for the composed application.
//!
//! These tests build a full [`App`](crate::App) from configuration with the
//! real ChaCha-backed RNG and drive it only through the mechanics facade and
//! the narrator post-processing, the way request handlers do.
//!
//! ```bash
//! cargo test -p chronicler-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod narration_flow_tests;

pub use e2e_helpers::*;
