//! Caller-owned state that check outcomes are applied to.

use serde::{Deserialize, Serialize};

/// Running tally of resolved checks for a scene.
///
/// Engines receive this by value and hand back the updated copy, so they can
/// never hold on to it between calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeState {
    pub successes: u32,
    pub failures: u32,
    /// Successes that came with a cost or complication
    pub partials: u32,
    /// Pending GM moves earned by misses
    pub gm_moves: u32,
    /// Detail lines of every applied check, oldest first
    pub log: Vec<String>,
}

impl OutcomeState {
    pub fn new() -> Self {
        Self::default()
    }
}
