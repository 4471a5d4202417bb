//! Deterministic deck shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the identical deal
//! - **Injectable**: The game state owns one `DealRng`; tests seed it or
//!   bypass it entirely with an explicit deck order
//!
//! ```
//! use solitaire_core::core::DealRng;
//!
//! let mut a = DealRng::new(7);
//! let mut b = DealRng::new(7);
//! assert_eq!(a.shuffled_deck(), b.shuffled_deck());
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::card::{CardId, DECK_SIZE};

/// Seedable RNG for dealing.
///
/// Uses ChaCha8 so the same seed yields the same deal on every platform.
#[derive(Clone, Debug)]
pub struct DealRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DealRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Produce a uniform random permutation of the 52 card ids.
    #[must_use]
    pub fn shuffled_deck(&mut self) -> [CardId; DECK_SIZE] {
        let mut deck = [CardId(0); DECK_SIZE];
        for (slot, card) in deck.iter_mut().zip(CardId::all()) {
            *slot = card;
        }
        self.shuffle(&mut deck);
        deck
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
