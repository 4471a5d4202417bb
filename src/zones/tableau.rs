//! The seven tableau piles and the deal algorithms.
//!
//! `Tableau` owns the card arena together with the ordered pile contents,
//! so every move updates a pile and the card's owner tag in one place.
//!
//! ## Deal Formula
//!
//! Both the initial deal and the redeal distribute a sequence by position
//! `c`: the card goes to pile `c % 7` and is face-up iff
//! `(c % 7) <= (c / 7)`. For a full deck, piles 0 to 3 get eight cards and
//! piles 4 to 6 get seven, and pile `k` hides exactly its first `k` rows.

use log::debug;
use smallvec::SmallVec;

use super::arena::CardArena;
use crate::core::card::{CardId, Owner, PileId, DECK_SIZE, TABLEAU_PILES};
use crate::core::config::RedealOrder;
use crate::core::rng::DealRng;

/// A contiguous slice of cards lifted from a pile, base first.
pub type Run = SmallVec<[CardId; 13]>;

/// The tableau: piles of card ids, bottom to top, plus the card arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tableau {
    piles: [Vec<CardId>; TABLEAU_PILES],
    cards: CardArena,
}

impl Tableau {
    /// Deal a tableau from an explicit deck order.
    ///
    /// Panics if `order` is not a permutation of all 52 cards.
    #[must_use]
    pub fn from_order(order: &[CardId]) -> Self {
        let mut tableau = Self {
            piles: Default::default(),
            cards: CardArena::new(),
        };
        tableau.deal_from_order(order);
        tableau
    }

    /// Build a tableau from explicit pile contents, bottom to top.
    ///
    /// Each entry is a card and its face-up flag. Cards not listed are
    /// tagged as settled on their suit's foundation.
    ///
    /// Panics if a card is listed twice.
    #[must_use]
    pub fn from_piles(piles: [Vec<(CardId, bool)>; TABLEAU_PILES]) -> Self {
        let mut cards = CardArena::new();
        for card in CardId::all() {
            cards.set_owner(card, Owner::Foundation(card.suit()));
            cards.set_face_up(card, true);
        }

        let mut seen = [false; DECK_SIZE];
        let mut ids: [Vec<CardId>; TABLEAU_PILES] = Default::default();
        for (pile, (entries, slot)) in PileId::all().zip(piles.iter().zip(ids.iter_mut())) {
            for &(card, face_up) in entries {
                assert!(!seen[card.index()], "Duplicate card {} in layout", card);
                seen[card.index()] = true;
                cards.set_owner(card, Owner::Tableau(pile));
                cards.set_face_up(card, face_up);
                slot.push(card);
            }
        }

        Self { piles: ids, cards }
    }

    /// Deal a tableau from a freshly shuffled deck.
    #[must_use]
    pub fn dealt(rng: &mut DealRng) -> Self {
        Self::from_order(&rng.shuffled_deck())
    }

    /// Replace the whole layout with a fresh random deal of all 52 cards.
    ///
    /// Cards owned elsewhere (foundation, flight) are pulled back in; the
    /// caller resets the foundation counters alongside.
    pub fn initial_deal(&mut self, rng: &mut DealRng) {
        self.deal_from_order(&rng.shuffled_deck());
    }

    /// Replace the whole layout with a deal of `order`.
    ///
    /// Panics if `order` is not a permutation of all 52 cards.
    pub fn deal_from_order(&mut self, order: &[CardId]) {
        assert_eq!(order.len(), DECK_SIZE, "A deal needs all 52 cards");
        let mut seen = [false; DECK_SIZE];
        for card in order {
            assert!(!seen[card.index()], "Duplicate card {} in deal order", card);
            seen[card.index()] = true;
        }

        for card in CardId::all() {
            self.cards.set_in_shuffle(card, false);
        }
        self.distribute(order);
        debug!("Dealt {} cards into {} piles", order.len(), TABLEAU_PILES);
    }

    /// Re-lay the current tableau deterministically.
    ///
    /// Each pile contributes its face-up run read top to bottom, then its
    /// face-down cards read bottom to top. The concatenation, in pile order
    /// and read in `order`, is distributed with the deal formula. No new
    /// randomness is introduced. Finally every non-empty pile's top card is
    /// turned face-up.
    pub fn redeal(&mut self, order: RedealOrder) {
        let mut sequence: Vec<CardId> = Vec::with_capacity(DECK_SIZE);
        for pile in &self.piles {
            sequence.extend(pile.iter().rev().filter(|&&c| self.cards.is_face_up(c)));
            sequence.extend(pile.iter().filter(|&&c| !self.cards.is_face_up(c)));
        }
        if order == RedealOrder::Reversed {
            sequence.reverse();
        }

        self.distribute(&sequence);
        for pile in PileId::all() {
            self.reveal_top(pile);
        }
        debug!("Redealt {} tableau cards ({:?})", sequence.len(), order);
    }

    fn distribute(&mut self, sequence: &[CardId]) {
        for pile in &mut self.piles {
            pile.clear();
        }
        for (c, &card) in sequence.iter().enumerate() {
            let pile = c % TABLEAU_PILES;
            let row = c / TABLEAU_PILES;
            self.piles[pile].push(card);
            self.cards.set_face_up(card, pile <= row);
            self.cards.set_owner(card, Owner::Tableau(PileId(pile as u8)));
        }
    }

    /// Cards of a pile, bottom to top.
    #[must_use]
    pub fn pile(&self, pile: PileId) -> &[CardId] {
        &self.piles[pile.index()]
    }

    /// All piles in index order.
    pub fn piles(&self) -> impl Iterator<Item = (PileId, &[CardId])> + '_ {
        PileId::all().zip(self.piles.iter().map(Vec::as_slice))
    }

    #[must_use]
    pub fn top(&self, pile: PileId) -> Option<CardId> {
        self.piles[pile.index()].last().copied()
    }

    #[must_use]
    pub fn card_at(&self, pile: PileId, index: usize) -> Option<CardId> {
        self.piles[pile.index()].get(index).copied()
    }

    /// Total number of cards in all piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Vec::len).sum()
    }

    /// Pile and index of a card, if it is in the tableau.
    #[must_use]
    pub fn slot_of(&self, card: CardId) -> Option<(PileId, usize)> {
        match self.cards.owner(card) {
            Owner::Tableau(pile) => self.piles[pile.index()]
                .iter()
                .position(|&c| c == card)
                .map(|index| (pile, index)),
            _ => None,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &CardArena {
        &self.cards
    }

    pub(crate) fn cards_mut(&mut self) -> &mut CardArena {
        &mut self.cards
    }

    #[must_use]
    pub fn is_face_up(&self, card: CardId) -> bool {
        self.cards.is_face_up(card)
    }

    /// Turn the top card of a pile face-up.
    ///
    /// Returns the card if it was face-down before.
    pub fn reveal_top(&mut self, pile: PileId) -> Option<CardId> {
        let top = self.top(pile)?;
        if self.cards.is_face_up(top) {
            return None;
        }
        self.cards.set_face_up(top, true);
        debug!("Revealed {} on {}", top, pile);
        Some(top)
    }

    /// Lift every card from `start` to the top of a pile into the hand.
    ///
    /// Returns an empty run if `start` is past the end.
    pub(crate) fn take_run(&mut self, pile: PileId, start: usize) -> Run {
        let cards = &mut self.piles[pile.index()];
        if start >= cards.len() {
            return Run::new();
        }
        let run: Run = cards.drain(start..).collect();
        for &card in &run {
            self.cards.set_owner(card, Owner::Hand);
        }
        run
    }

    /// Put a run on top of a pile, base first.
    pub(crate) fn place_run(&mut self, pile: PileId, run: &[CardId]) {
        for &card in run {
            self.cards.set_owner(card, Owner::Tableau(pile));
        }
        self.piles[pile.index()].extend_from_slice(run);
    }

    /// Remove the top card of a pile, handing it to `new_owner`.
    ///
    /// The new top card is revealed.
    pub(crate) fn pop_top(&mut self, pile: PileId, new_owner: Owner) -> Option<CardId> {
        let card = self.piles[pile.index()].pop()?;
        self.cards.set_owner(card, new_owner);
        self.reveal_top(pile);
        Some(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_order() -> Vec<CardId> {
        CardId::all().collect()
    }

    #[test]
    fn test_triangular_layout() {
        let tableau = Tableau::from_order(&identity_order());

        for (pile, cards) in tableau.piles() {
            let face_up = cards.iter().filter(|&&c| tableau.is_face_up(c)).count();
            assert!(tableau.is_face_up(*cards.last().unwrap()), "{} top hidden", pile);
            // Only the cards dealt from row `pile` on are face-up
            assert_eq!(face_up, cards.len() - pile.index());
        }
        assert_eq!(tableau.pile(PileId(0)).len(), 8);
        assert_eq!(tableau.pile(PileId(6)).len(), 7);
        assert_eq!(tableau.card_count(), DECK_SIZE);
    }

    #[test]
    fn test_owner_tags_match_piles() {
        let tableau = Tableau::from_order(&identity_order());
        for (pile, cards) in tableau.piles() {
            for (index, &card) in cards.iter().enumerate() {
                assert_eq!(tableau.cards().owner(card), Owner::Tableau(pile));
                assert_eq!(tableau.slot_of(card), Some((pile, index)));
            }
        }
    }

    #[test]
    #[should_panic(expected = "Duplicate card")]
    fn test_deal_rejects_duplicates() {
        let mut order = identity_order();
        order[1] = CardId(0);
        let _ = Tableau::from_order(&order);
    }

    #[test]
    fn test_take_and_place_run() {
        let mut tableau = Tableau::from_order(&identity_order());
        let run = tableau.take_run(PileId(3), 5);

        assert_eq!(run.as_slice(), &[CardId(38), CardId(45)]);
        assert!(run.iter().all(|&c| tableau.cards().owner(c) == Owner::Hand));
        assert_eq!(tableau.pile(PileId(3)).len(), 5);

        tableau.place_run(PileId(1), &run);
        assert_eq!(tableau.top(PileId(1)), Some(CardId(45)));
        assert_eq!(tableau.cards().owner(CardId(38)), Owner::Tableau(PileId(1)));
    }

    #[test]
    fn test_take_run_past_end_is_empty() {
        let mut tableau = Tableau::from_order(&identity_order());
        assert!(tableau.take_run(PileId(0), 20).is_empty());
        assert_eq!(tableau.card_count(), DECK_SIZE);
    }

    #[test]
    fn test_pop_top_reveals_next() {
        let mut tableau = Tableau::from_order(&identity_order());
        // Pile 6 is [6, 13, 20, 27, 34, 41, 48]; 41 is face-down under 48
        assert!(!tableau.is_face_up(CardId(41)));

        let popped = tableau.pop_top(PileId(6), Owner::Flight);
        assert_eq!(popped, Some(CardId(48)));
        assert_eq!(tableau.cards().owner(CardId(48)), Owner::Flight);
        assert!(tableau.is_face_up(CardId(41)));
    }

    #[test]
    fn test_reveal_top_on_empty_pile() {
        let mut tableau = Tableau::from_order(&identity_order());
        let _ = tableau.take_run(PileId(2), 0);
        assert_eq!(tableau.reveal_top(PileId(2)), None);
    }
}
