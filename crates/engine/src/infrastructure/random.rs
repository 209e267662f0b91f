//! Random implementations for the domain dice ports.

use chronicler_domain::{DiceRng, RngProvider};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Dice backed by a ChaCha8 stream.
pub struct ChaChaDice {
    rng: ChaCha8Rng,
}

impl ChaChaDice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl DiceRng for ChaChaDice {
    fn roll_die(&mut self, faces: u32) -> u32 {
        self.rng.gen_range(1..=faces.max(1))
    }
}

/// System random - seeded ChaCha8 when a seed is given, OS entropy otherwise.
pub struct SystemRngProvider;

impl SystemRngProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRngProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RngProvider for SystemRngProvider {
    fn session_rng(&self, seed: Option<u64>) -> Box<dyn DiceRng> {
        match seed {
            Some(seed) => Box::new(ChaChaDice::seeded(seed)),
            None => Box::new(ChaChaDice::from_entropy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(rng: &mut dyn DiceRng, faces: u32, n: usize) -> Vec<u32> {
        (0..n).map(|_| rng.roll_die(faces)).collect()
    }

    #[test]
    fn same_seed_same_stream() {
        let provider = SystemRngProvider::new();
        let mut a = provider.session_rng(Some(42));
        let mut b = provider.session_rng(Some(42));
        assert_eq!(draw(a.as_mut(), 20, 64), draw(b.as_mut(), 20, 64));
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = ChaChaDice::seeded(1);
        let mut b = ChaChaDice::seeded(2);
        assert_ne!(draw(&mut a, 1000, 16), draw(&mut b, 1000, 16));
    }

    #[test]
    fn faces_stay_in_range() {
        let mut dice = ChaChaDice::from_entropy();
        for faces in [1, 2, 6, 20, 100] {
            for value in draw(&mut dice, faces, 200) {
                assert!((1..=faces).contains(&value));
            }
        }
    }

    #[test]
    fn single_faced_die_always_rolls_one() {
        let mut dice = ChaChaDice::seeded(9);
        assert!(draw(&mut dice, 1, 32).iter().all(|&v| v == 1));
    }
}
