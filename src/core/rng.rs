//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deal
//! - **Serializable**: O(1) state capture and restore
//! - **Context streams**: Independent sequences for different purposes
//!
//! ```
//! use memorama::core::GameRng;
//!
//! let mut a = GameRng::new(42).for_context("deal");
//! let mut b = GameRng::new(42).for_context("deal");
//!
//! let mut left: Vec<u32> = (0..6).collect();
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG for dealing pairs and automated play.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
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

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// Keeps randomness domains apart (dealing vs. automated clicks).
    /// The same context always produces the same stream from the same seed,
    /// across builds and toolchains, so saved histories keep replaying
    /// against the same deal.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Shuffle a slice in place with Fisher-Yates.
    ///
    /// Walks `i` from the last index down to 1 and swaps element `i` with a
    /// uniformly chosen element in `[0, i]`, so every permutation is equally
    /// likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.inner.gen_range(0..1000), rng2.inner.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.inner.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.inner.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut deal = rng.for_context("deal");
        let mut autoplay = rng.for_context("autoplay");

        let seq1: Vec<_> = (0..10).map(|_| deal.inner.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| autoplay.inner.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    #[cfg(all(target_pointer_width = "64", target_endian = "little"))]
    fn test_context_seed_is_stable() {
        // Saved histories depend on these exact values.
        assert_eq!(GameRng::new(42).for_context("deal").seed(), 0x4100_b561_c74a_fb93);
        assert_eq!(GameRng::new(42).for_context("autoplay").seed(), 17_053_616_920_610_647_477);
    }

    #[test]
    fn test_shuffle_matches_reverse_fisher_yates() {
        let mut a = GameRng::new(11);
        let mut b = GameRng::new(11);

        let mut shuffled: Vec<u32> = (0..12).collect();
        a.shuffle(&mut shuffled);

        let mut manual: Vec<u32> = (0..12).collect();
        for i in (1..manual.len()).rev() {
            let j = b.inner.gen_range(0..(i + 1) as u32) as usize;
            manual.swap(i, j);
        }
        assert_eq!(shuffled, manual);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Same elements, different order (very likely)
        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_small_slices() {
        let mut rng = GameRng::new(7);

        let mut empty: Vec<u32> = vec![];
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![9];
        rng.shuffle(&mut single);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // Element 0 should end up in each slot at least once over many deals.
        let mut rng = GameRng::new(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let mut data = [0, 1, 2, 3];
            rng.shuffle(&mut data);
            let pos = data.iter().position(|&x| x == 0).unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.inner.gen_range(0..1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.inner.gen_range(0..1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.inner.gen_range(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
