//! Card locations: the arena of card records, the tableau piles, and the
//! foundation counters.
//!
//! Every card has exactly one owner at all times. Cards move by being
//! removed from one collection and inserted into another in the same call,
//! with the owner tag updated alongside.

mod arena;
mod foundation;
mod tableau;

pub use arena::{CardArena, CardRecord};
pub use foundation::FoundationTracker;
pub use tableau::{Run, Tableau};
