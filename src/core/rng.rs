//! Deterministic random number generation for deck shuffling.
//!
//! Each duel owns one `GameRng` seeded from its `DuelConfig`. Separate
//! concerns draw from independent context streams so that adding a new
//! random consumer never perturbs the shuffle order of existing ones.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derive the stream for a named consumer (e.g. `"deck-shuffle"`).
    ///
    /// Derivation uses `FxHasher`, whose output does not change between
    /// toolchains, so recorded seeds replay identically.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
