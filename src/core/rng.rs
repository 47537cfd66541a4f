//! Seeded randomness for encounters.
//!
//! Every random decision of an encounter (deck order, charm picks, gold
//! rolls, monster selection) draws from a `GameRng`. Each consumer gets
//! its own named stream via `for_context`, so adding a draw in one place
//! never shifts the numbers another sees.
//!
//! ```
//! use poker_crawl::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut deck = root.for_context("deck");
//! let mut again = GameRng::new(42).for_context("deck");
//!
//! assert_eq!(deck.gen_between(1, 6), again.gen_between(1, 6));
//! assert_ne!(root.for_context("deck").seed(), root.for_context("combat").seed());
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8 stream that remembers the seed it came from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fresh stream keyed by `(seed, context)`. Independent of how much
    /// `self` has already been drawn from.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        (self.seed, context).hash(&mut hasher);
        Self::new(hasher.finish())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `min..=max`. Swapped bounds are tolerated.
    pub fn gen_between(&mut self, min: i64, max: i64) -> i64 {
        self.inner.gen_range(min.min(max)..=min.max(max))
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Index picked with probability proportional to its weight.
    ///
    /// Non-positive weights are never picked; `None` when nothing is
    /// pickable.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().copied().filter(|w| *w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut remaining = self.inner.gen::<f32>() * total;
        let last = weights.iter().rposition(|w| *w > 0.0);
        for (index, weight) in weights.iter().copied().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            remaining -= weight;
            if remaining <= 0.0 {
                return Some(index);
            }
        }
        // Rounding can leave a sliver above zero.
        last
    }
}
