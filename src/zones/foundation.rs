//! Per-suit foundation counters.
//!
//! Two counters per suit:
//! - `highest_recovered`: the logical foundation, advanced the moment a card
//!   is recovered
//! - `arrived`: what the renderer shows, advanced when the card's flight lands
//!
//! Both start empty (`None`). A recovery advances `highest_recovered` by
//! exactly one rank; `arrived` only ever moves up.

use log::debug;
use serde::{Deserialize, Serialize};

use super::tableau::Tableau;
use crate::core::card::{CardId, Owner, PileId, Rank, Suit, SUIT_COUNT};

/// Foundation counters for the four suits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundationTracker {
    highest_recovered: [Option<Rank>; SUIT_COUNT],
    arrived: [Option<Rank>; SUIT_COUNT],
}

impl FoundationTracker {
    /// Create a tracker with every foundation empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with cards already home, arrivals included.
    #[must_use]
    pub fn with_recovered(highest: [Option<Rank>; SUIT_COUNT]) -> Self {
        Self {
            highest_recovered: highest,
            arrived: highest,
        }
    }

    /// Empty every foundation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Highest rank recovered for a suit, `None` if nothing yet.
    #[must_use]
    pub fn highest_recovered(&self, suit: Suit) -> Option<Rank> {
        self.highest_recovered[suit.index()]
    }

    /// Highest rank whose flight has landed for a suit.
    #[must_use]
    pub fn arrived(&self, suit: Suit) -> Option<Rank> {
        self.arrived[suit.index()]
    }

    /// Number of cards recovered for a suit.
    #[must_use]
    pub fn recovered_count(&self, suit: Suit) -> usize {
        self.highest_recovered[suit.index()].map_or(0, |rank| rank.value() as usize + 1)
    }

    /// Every recovered card, suit by suit, lowest rank first.
    pub fn recovered_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        Suit::all().flat_map(move |suit| {
            (0..self.recovered_count(suit) as u8).map(move |rank| CardId::from_parts(suit, Rank(rank)))
        })
    }

    /// Can this card go to its foundation next?
    ///
    /// True iff it is exactly one rank above the suit's highest recovered
    /// card, or an ace onto an empty foundation.
    #[must_use]
    pub fn can_auto_recover(&self, card: CardId) -> bool {
        match self.highest_recovered(card.suit()) {
            None => card.rank().is_ace(),
            Some(highest) => card.rank().value() == highest.value() + 1,
        }
    }

    /// Recover the top card of `pile` to its foundation.
    ///
    /// Checks every precondition before mutating: the pile has a face-up top
    /// card that `can_auto_recover`. On success the counter advances, the
    /// card leaves the pile owned by the flight track, and the new top card
    /// is revealed. The caller launches the flight.
    pub fn recover(&mut self, tableau: &mut Tableau, pile: PileId) -> Option<CardId> {
        let card = tableau.top(pile)?;
        if !tableau.is_face_up(card) || !self.can_auto_recover(card) {
            return None;
        }

        let slot = &mut self.highest_recovered[card.suit().index()];
        *slot = Some(slot.map_or(Rank::ACE, |rank| Rank(rank.value() + 1)));
        tableau.pop_top(pile, Owner::Flight);
        debug!("Recovered {} from {}", card, pile);
        Some(card)
    }

    /// Record that a card's flight has landed.
    ///
    /// Never lowers the shown rank: a lower card landing after a higher one
    /// leaves the higher one displayed.
    pub fn mark_arrived(&mut self, card: CardId) {
        let slot = &mut self.arrived[card.suit().index()];
        *slot = (*slot).max(Some(card.rank()));
    }
}
