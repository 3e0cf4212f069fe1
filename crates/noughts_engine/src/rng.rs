//! Deterministic random source for the computer's fallback move.
//!
//! ```
//! use noughts_engine::MoveRng;
//! use rand::Rng;
//!
//! let mut a = MoveRng::seeded(42);
//! let mut b = MoveRng::seeded(42);
//! assert_eq!(a.gen_range(0..9), b.gen_range(0..9));
//! ```

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG handed to the strategy.
///
/// Sessions own one of these; tests pin the seed so the random fallback
/// is reproducible.
#[derive(Clone, Debug)]
pub struct MoveRng {
    inner: ChaCha8Rng,
    seed: Option<u64>,
}

impl MoveRng {
    /// Create an RNG with the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create an RNG seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Seed if one was provided.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RngCore for MoveRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = MoveRng::seeded(9);
        let mut b = MoveRng::seeded(9);
        let xs: Vec<usize> = (0..16).map(|_| a.gen_range(0..9)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.gen_range(0..9)).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.seed(), Some(9));
    }

    #[test]
    fn test_entropy_has_no_seed() {
        assert_eq!(MoveRng::from_entropy().seed(), None);
    }
}
