//! Core engine types: card identity, geometry, RNG, configuration, state.
//!
//! Everything else in the crate builds on these; nothing here knows about
//! move rules or animation timing.

pub mod card;
pub mod geometry;
pub mod rng;
pub mod config;
pub mod state;

pub use card::{CardId, Owner, PileId, Rank, Suit, DECK_SIZE, RANKS_PER_SUIT, SUIT_COUNT, TABLEAU_PILES};
pub use geometry::Vec2;
pub use rng::DealRng;
pub use config::{Layout, RedealOrder, SpreadTarget, TableButton, TableConfig};
pub use state::GameState;
