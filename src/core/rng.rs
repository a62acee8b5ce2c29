//! Deterministic random number generation for deck shuffling.
//!
//! Every shuffle in a match flows through a single `GameRng` owned by the
//! deck, so replaying a match from its seed reproduces the exact pile
//! orders.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing deck shuffles.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality
/// randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place (uniform Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
