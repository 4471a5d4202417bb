//! Structural checks over a `GameState`.
//!
//! Moves keep these properties by construction. The checks exist so tests
//! and debug builds can verify that they never break.

use std::fmt;

use crate::core::card::{CardId, Owner, PileId, Suit, DECK_SIZE};
use crate::core::state::GameState;

/// A broken structural property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A card appears in more than one place.
    DuplicateCard(CardId),
    /// A card appears nowhere.
    MissingCard(CardId),
    /// A card's owner tag disagrees with the collection holding it.
    OwnerMismatch {
        card: CardId,
        expected: Owner,
        found: Owner,
    },
    /// A non-empty pile's top card is face-down.
    HiddenTopCard(PileId),
    /// A foundation shows a rank that was never recovered.
    ArrivalAhead(Suit),
    /// A recovered card never landed on its foundation.
    ArrivalMissing(Suit),
    /// A drag or animation is in progress.
    NotStable,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::DuplicateCard(card) => write!(f, "{} held twice", card),
            InvariantViolation::MissingCard(card) => write!(f, "{} held nowhere", card),
            InvariantViolation::OwnerMismatch {
                card,
                expected,
                found,
            } => write!(f, "{} tagged {:?} but held by {:?}", card, found, expected),
            InvariantViolation::HiddenTopCard(pile) => write!(f, "Top card of {} is face-down", pile),
            InvariantViolation::ArrivalAhead(suit) => {
                write!(f, "Foundation {} shows an unrecovered rank", suit)
            }
            InvariantViolation::ArrivalMissing(suit) => {
                write!(f, "Foundation {} is missing a recovered card", suit)
            }
            InvariantViolation::NotStable => write!(f, "Table is not stable"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Every card is held by exactly one collection, and its owner tag says so.
///
/// Collections are the piles, the drag hand, the flight track, and the
/// recovered range of each foundation. Holds at every moment, not only
/// stable ones.
pub fn check_conservation(state: &GameState) -> Result<(), InvariantViolation> {
    let mut seen = [false; DECK_SIZE];
    let cards = state.tableau.cards();

    let mut claim = |card: CardId, expected: Owner| -> Result<(), InvariantViolation> {
        if std::mem::replace(&mut seen[card.index()], true) {
            return Err(InvariantViolation::DuplicateCard(card));
        }
        let found = cards.owner(card);
        if found != expected {
            return Err(InvariantViolation::OwnerMismatch {
                card,
                expected,
                found,
            });
        }
        Ok(())
    };

    for (pile, pile_cards) in state.tableau.piles() {
        for &card in pile_cards {
            claim(card, Owner::Tableau(pile))?;
        }
    }
    if let Some(drag) = &state.drag {
        for &card in &drag.run {
            claim(card, Owner::Hand)?;
        }
    }
    for flight in state.flights.iter() {
        claim(flight.card, Owner::Flight)?;
    }
    for card in state.foundation.recovered_cards() {
        if !state.flights.contains(card) {
            claim(card, Owner::Foundation(card.suit()))?;
        }
    }

    match CardId::all().find(|card| !seen[card.index()]) {
        Some(card) => Err(InvariantViolation::MissingCard(card)),
        None => Ok(()),
    }
}

/// Every non-empty pile shows its top card.
pub fn check_top_cards_face_up(state: &GameState) -> Result<(), InvariantViolation> {
    for (pile, _) in state.tableau.piles() {
        if let Some(top) = state.tableau.top(pile) {
            if !state.tableau.is_face_up(top) {
                return Err(InvariantViolation::HiddenTopCard(pile));
            }
        }
    }
    Ok(())
}

/// Foundations never show more than was recovered.
pub fn check_foundations(state: &GameState) -> Result<(), InvariantViolation> {
    for suit in Suit::all() {
        if state.foundation.arrived(suit) > state.foundation.highest_recovered(suit) {
            return Err(InvariantViolation::ArrivalAhead(suit));
        }
    }
    Ok(())
}

/// All checks, for a state with no drag and no animation running.
pub fn check_stable(state: &GameState) -> Result<(), InvariantViolation> {
    if !state.is_stable() {
        return Err(InvariantViolation::NotStable);
    }
    check_conservation(state)?;
    check_top_cards_face_up(state)?;
    check_foundations(state)?;
    // Every recovered card has landed once the flights are done
    for suit in Suit::all() {
        if state.foundation.arrived(suit) != state.foundation.highest_recovered(suit) {
            return Err(InvariantViolation::ArrivalMissing(suit));
        }
    }
    Ok(())
}
