//! Animation tracks, advanced once per fixed tick.
//!
//! Two independent tracks:
//! - **Flight** (`FlightTrack`): recovered cards flying to their foundation.
//!   Never blocks input.
//! - **Shuffle** (`ShuffleTrack`): the deal-again / retry transition. While
//!   it runs the table does not accept pointer input.
//!
//! Animations are never cancelled; each runs for the tick count planned
//! when it started.

mod flight;
mod shuffle;

pub use flight::{FlightAnimation, FlightTrack};
pub use shuffle::{Destination, ShuffleCard, ShufflePhase, ShuffleTrack};

use smallvec::SmallVec;

use crate::core::card::{CardId, Owner};
use crate::core::state::GameState;

impl GameState {
    /// Advance every flight one tick, settling the ones that land.
    ///
    /// Returns the cards that landed.
    pub fn advance_flights(&mut self) -> SmallVec<[CardId; 4]> {
        let landed = self.flights.tick();
        for &card in &landed {
            self.foundation.mark_arrived(card);
            self.tableau
                .cards_mut()
                .set_owner(card, Owner::Foundation(card.suit()));
        }
        landed
    }

    /// Advance the shuffle track one tick.
    ///
    /// Cards that settle go back to being drawn from the piles. Returns them.
    pub fn advance_shuffle(&mut self) -> Vec<CardId> {
        let retired = self.shuffle.tick();
        for &card in &retired {
            self.tableau.cards_mut().set_in_shuffle(card, false);
        }
        retired
    }
}
