//! Move legality rules.
//!
//! Pure functions over the tableau and foundation; nothing here mutates.
//!
//! - A press lifts everything from the **run base** up to the top of the
//!   pile. The base is found by walking down from the clicked card while
//!   the cards form a face-up, same-suit, strictly descending sequence.
//!   Cards above the clicked card come along whether or not they continue
//!   that sequence, so a lifted run is only guaranteed ordered from its base
//!   to the clicked card.
//! - A run may be dropped onto a pile whose face-up top card is the same suit
//!   and exactly one rank higher than the run's base, or onto an empty pile
//!   if its base is a king. Colors never matter.

use crate::core::card::{CardId, PileId};
use crate::zones::{FoundationTracker, Tableau};

/// What a press on a pile cell amounts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressAction {
    /// Nothing to pick up there.
    Ignore,
    /// The top card goes straight to its foundation.
    Recover(CardId),
    /// Lift the run starting at this index.
    Drag { start: usize },
}

/// Index of the base of the run that contains `clicked`.
///
/// Extends from `clicked` toward the pile base while the card below is
/// face-up, not an ace, and exactly one id above the card on it. The ace
/// check keeps a run from continuing across a suit boundary (a king of one
/// suit sits one id below the ace of the next).
#[must_use]
pub fn run_start(tableau: &Tableau, pile: PileId, clicked: usize) -> usize {
    let cards = tableau.pile(pile);
    let mut start = clicked.min(cards.len().saturating_sub(1));
    while start > 0 {
        let below = cards[start - 1];
        let current = cards[start];
        let continues = tableau.is_face_up(below)
            && !below.rank().is_ace()
            && below.0 == current.0 + 1;
        if !continues {
            break;
        }
        start -= 1;
    }
    start
}

/// The draggable run for a press on `clicked`, base first.
///
/// Spans from `run_start` to the top of the pile.
#[must_use]
pub fn compute_run(tableau: &Tableau, pile: PileId, clicked: usize) -> &[CardId] {
    let cards = tableau.pile(pile);
    if clicked >= cards.len() {
        return &[];
    }
    &cards[run_start(tableau, pile, clicked)..]
}

/// Can `run` be dropped onto `target`?
#[must_use]
pub fn is_valid_target(tableau: &Tableau, target: PileId, run: &[CardId]) -> bool {
    let Some(&base) = run.first() else {
        return false;
    };
    match tableau.top(target) {
        None => base.rank().is_king(),
        Some(top) => {
            tableau.is_face_up(top) && top.suit() == base.suit() && base.next_higher() == Some(top)
        }
    }
}

/// Decide what a press on cell `index` of `pile` does.
///
/// Face-down or empty cells are ignored. The top card goes to its
/// foundation when it can, which takes priority over dragging it.
#[must_use]
pub fn classify_press(
    tableau: &Tableau,
    foundation: &FoundationTracker,
    pile: PileId,
    index: usize,
) -> PressAction {
    let Some(card) = tableau.card_at(pile, index) else {
        return PressAction::Ignore;
    };
    if !tableau.is_face_up(card) {
        return PressAction::Ignore;
    }

    let is_top = index + 1 == tableau.pile(pile).len();
    if is_top && foundation.can_auto_recover(card) {
        return PressAction::Recover(card);
    }
    PressAction::Drag {
        start: run_start(tableau, pile, index),
    }
}
