//! Table actions: recover to foundation, deal again, retry.
//!
//! Deal-again and retry both start the shuffle animation. The sequence is
//! always the same:
//! 1. Snapshot every affected card's drawn position and face
//! 2. Apply the logical action to the tableau and foundation
//! 3. Put the cards on the shuffle track, aimed at the configured target

use log::info;

use crate::animation::{Destination, FlightAnimation};
use crate::core::card::{CardId, PileId};
use crate::core::config::SpreadTarget;
use crate::core::geometry::Vec2;
use crate::core::state::GameState;

/// A card's drawn state captured before a shuffle action.
#[derive(Clone, Copy, Debug)]
struct SlotSnapshot {
    card: CardId,
    position: Vec2,
    face_up: bool,
    previous: Destination,
}

impl GameState {
    /// Send the top card of `pile` to its foundation and launch its flight.
    ///
    /// Returns `None`, changing nothing, if the top card cannot go yet.
    pub fn recover(&mut self, pile: PileId) -> Option<CardId> {
        let row = self.tableau.pile(pile).len().checked_sub(1)?;
        let from = self.layout.pile_slot(pile, row);
        let card = self.foundation.recover(&mut self.tableau, pile)?;

        let to = self.layout.foundation_slot(card.suit());
        self.flights
            .launch(FlightAnimation::launch(card, from, to, self.config.flight_speed));
        Some(card)
    }

    /// Re-lay the tableau deterministically and animate the change.
    ///
    /// Ignored while a run is held or a shuffle is already running.
    pub fn deal_again(&mut self) -> bool {
        if self.drag.is_some() || self.shuffle.is_active() {
            return false;
        }

        let snapshot = self.snapshot_tableau();
        self.tableau.redeal(self.config.redeal_order);
        info!("Dealt again ({} cards)", snapshot.len());
        self.begin_shuffle(snapshot);
        true
    }

    /// Start a new game: every card, foundations included, is reshuffled.
    ///
    /// Ignored while a run is held, a shuffle is running, or a card is still
    /// flying to its foundation.
    pub fn retry(&mut self) -> bool {
        if self.drag.is_some() || self.shuffle.is_active() || !self.flights.is_empty() {
            return false;
        }

        let mut snapshot = self.snapshot_tableau();
        for card in self.foundation.recovered_cards() {
            let position = self.layout.foundation_slot(card.suit());
            snapshot.push(SlotSnapshot {
                card,
                position,
                face_up: true,
                previous: Destination {
                    position,
                    pile: None,
                    row: card.rank().value() as usize,
                },
            });
        }

        self.tableau.initial_deal(&mut self.rng);
        self.foundation.reset();
        info!("New game dealt (seed {})", self.rng.seed());
        self.begin_shuffle(snapshot);
        true
    }

    fn snapshot_tableau(&self) -> Vec<SlotSnapshot> {
        let mut snapshot = Vec::with_capacity(self.tableau.card_count());
        for (pile, cards) in self.tableau.piles() {
            for (row, &card) in cards.iter().enumerate() {
                let position = self.layout.pile_slot(pile, row);
                snapshot.push(SlotSnapshot {
                    card,
                    position,
                    face_up: self.tableau.is_face_up(card),
                    previous: Destination {
                        position,
                        pile: Some(pile),
                        row,
                    },
                });
            }
        }
        snapshot
    }

    /// Where the current layout draws a card.
    fn dealt_destination(&self, card: CardId) -> Destination {
        match self.tableau.slot_of(card) {
            Some((pile, row)) => Destination {
                position: self.layout.pile_slot(pile, row),
                pile: Some(pile),
                row,
            },
            None => Destination {
                position: self.layout.foundation_slot(card.suit()),
                pile: None,
                row: card.rank().value() as usize,
            },
        }
    }

    fn begin_shuffle(&mut self, snapshot: Vec<SlotSnapshot>) {
        let target = self.config.spread_target;
        let entries: Vec<_> = snapshot
            .into_iter()
            .map(|s| {
                let destination = match target {
                    SpreadTarget::PreviousSlot => s.previous,
                    SpreadTarget::DealtSlot => self.dealt_destination(s.card),
                };
                (s.card, s.position, s.face_up, destination)
            })
            .collect();

        for &(card, ..) in &entries {
            self.tableau.cards_mut().set_in_shuffle(card, true);
        }
        self.shuffle
            .begin(self.layout.staging_point(), self.config.shuffle_speed, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Owner, Rank, Suit, TABLEAU_PILES};
    use crate::core::config::TableConfig;

    fn identity_state(config: TableConfig) -> GameState {
        GameState::from_order(config, &CardId::all().collect::<Vec<_>>())
    }

    #[test]
    fn test_recover_launches_flight() {
        let mut piles: [Vec<(CardId, bool)>; TABLEAU_PILES] = Default::default();
        piles[2] = vec![(CardId(30), false), (CardId(13), true)];
        piles[0] = CardId::all()
            .filter(|c| ![30, 13].contains(&c.0))
            .map(|c| (c, true))
            .collect();
        let mut state = GameState::from_piles(TableConfig::default(), piles);

        assert_eq!(state.recover(PileId(2)), Some(CardId(13)));
        assert_eq!(state.foundation.highest_recovered(Suit(1)), Some(Rank(0)));
        assert_eq!(state.flights.len(), 1);
        let flight = state.flights.iter().next().unwrap();
        assert_eq!(flight.position, state.layout.pile_slot(PileId(2), 1));
        assert_eq!(state.tableau.cards().owner(CardId(13)), Owner::Flight);
        assert!(state.tableau.is_face_up(CardId(30)));
    }

    #[test]
    fn test_recover_refused_leaves_state() {
        let mut state = identity_state(TableConfig::default());
        let before = state.tableau.clone();
        assert_eq!(state.recover(PileId(4)), None);
        assert_eq!(state.tableau, before);
        assert!(state.flights.is_empty());
    }

    #[test]
    fn test_deal_again_snapshots_before_redeal() {
        let mut state = identity_state(TableConfig::default());
        let before = state.tableau.clone();
        assert!(state.deal_again());

        assert_eq!(state.shuffle.len(), 52);
        for entry in state.shuffle.iter() {
            let (pile, row) = before.slot_of(entry.card).unwrap();
            assert_eq!(entry.source, state.layout.pile_slot(pile, row));
            assert_eq!(entry.snapshot_face_up, before.is_face_up(entry.card));
            // Default target: the slot of the new layout
            let (new_pile, new_row) = state.tableau.slot_of(entry.card).unwrap();
            assert_eq!(entry.destination.pile, Some(new_pile));
            assert_eq!(entry.destination.row, new_row);
            assert!(state.tableau.cards().in_shuffle(entry.card));
        }
        assert!(!state.accepts_input());
        assert!(!state.deal_again());
    }

    #[test]
    fn test_previous_slot_target() {
        let config = TableConfig::default().with_spread_target(SpreadTarget::PreviousSlot);
        let mut state = identity_state(config);
        assert!(state.deal_again());

        for entry in state.shuffle.iter() {
            assert_eq!(entry.destination.position, entry.source);
        }
    }

    #[test]
    fn test_retry_gathers_foundation_cards() {
        let mut piles: [Vec<(CardId, bool)>; TABLEAU_PILES] = Default::default();
        piles[0] = CardId::all().skip(3).map(|c| (c, true)).collect();
        let mut state = GameState::from_piles(TableConfig::default(), piles);
        assert_eq!(state.foundation.recovered_count(Suit(0)), 3);

        assert!(state.retry());
        assert_eq!(state.shuffle.len(), 52);
        assert_eq!(state.foundation.recovered_count(Suit(0)), 0);
        assert_eq!(state.foundation.arrived(Suit(0)), None);
        assert_eq!(state.tableau.card_count(), 52);

        let ace = state.shuffle.iter().find(|e| e.card == CardId(0)).unwrap();
        assert_eq!(ace.source, state.layout.foundation_slot(Suit(0)));
    }

    #[test]
    fn test_retry_waits_for_flights() {
        let mut piles: [Vec<(CardId, bool)>; TABLEAU_PILES] = Default::default();
        piles[0] = CardId::all().map(|c| (c, true)).collect();
        piles[0].retain(|&(c, _)| c != CardId(0));
        piles[1] = vec![(CardId(0), true)];
        let mut state = GameState::from_piles(TableConfig::default(), piles);

        assert_eq!(state.recover(PileId(1)), Some(CardId(0)));
        assert!(!state.retry());
        assert!(state.deal_again());
    }
}
