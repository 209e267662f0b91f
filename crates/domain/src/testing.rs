//! Scripted dice for deterministic tests.
//!
//! Available to this crate's unit tests and, through the `testing` feature,
//! to integration tests of dependent crates.

use std::collections::VecDeque;

use crate::ports::{DiceRng, RngProvider};

/// Replays a fixed list of faces, starting over when it runs out.
///
/// A scripted value larger than the die is wrapped into `1..=faces`, so a
/// script never produces an impossible face.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    script: Vec<u32>,
    pending: VecDeque<u32>,
    draws: usize,
}

impl ScriptedDice {
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        let script: Vec<u32> = script.into_iter().collect();
        Self {
            pending: script.iter().copied().collect(),
            script,
            draws: 0,
        }
    }

    /// Number of faces drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl DiceRng for ScriptedDice {
    fn roll_die(&mut self, faces: u32) -> u32 {
        if self.pending.is_empty() {
            self.pending.extend(self.script.iter().copied());
        }
        self.draws += 1;
        let value = self.pending.pop_front().unwrap_or(1).max(1);
        (value - 1) % faces.max(1) + 1
    }
}

/// Hands every session a fresh [`ScriptedDice`], ignoring the seed.
///
/// Re-initialising a session therefore restarts the script, the same way a
/// real provider replays a seed.
#[derive(Debug, Clone)]
pub struct ScriptedRngProvider {
    script: Vec<u32>,
}

impl ScriptedRngProvider {
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl RngProvider for ScriptedRngProvider {
    fn session_rng(&self, _seed: Option<u64>) -> Box<dyn DiceRng> {
        Box::new(ScriptedDice::new(self.script.clone()))
    }
}
