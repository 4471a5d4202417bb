//! The pick-up / drop gesture.
//!
//! `Idle -> (press on a face-up run) -> Dragging -> (release) -> Idle`.
//! While dragging, the run is owned by the hand; the drop either appends it
//! to a valid target pile or returns it unchanged to its origin.

use log::debug;
use serde::{Deserialize, Serialize};

use super::validator::{classify_press, is_valid_target, PressAction};
use crate::core::card::{CardId, PileId};
use crate::core::geometry::Vec2;
use crate::core::state::GameState;
use crate::zones::Run;

/// A run held under the pointer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Pile the run was lifted from.
    pub origin: PileId,

    /// The lifted cards, base first.
    pub run: Run,

    /// Pointer position minus the base card's slot origin.
    pub grab_offset: Vec2,
}

impl DragSession {
    /// Where to draw card `k` of the run for a pointer at `pointer`.
    #[must_use]
    pub fn card_position(&self, pointer: Vec2, k: usize, row_height: f32) -> Vec2 {
        pointer - self.grab_offset + Vec2::new(0.0, k as f32 * row_height)
    }
}

/// Result of a press on a pile cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickUpOutcome {
    /// Nothing happened.
    Ignored,
    /// The top card went to its foundation instead of being dragged.
    Recovered(CardId),
    /// A drag session was opened holding this many cards.
    Dragging(usize),
}

/// Result of releasing a held run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// No run was held.
    NoDrag,
    /// The run was appended to the target pile.
    Placed(PileId),
    /// The run went back to its origin pile.
    Returned(PileId),
}

impl GameState {
    /// Press on cell `index` of `pile` with the pointer at `pointer`.
    ///
    /// Recovers the top card if it can go to its foundation, otherwise lifts
    /// the run containing the cell. Ignored while a run is already held or
    /// the shuffle track is running.
    pub fn pick_up(&mut self, pile: PileId, index: usize, pointer: Vec2) -> PickUpOutcome {
        if self.drag.is_some() || !self.accepts_input() {
            return PickUpOutcome::Ignored;
        }

        match classify_press(&self.tableau, &self.foundation, pile, index) {
            PressAction::Ignore => PickUpOutcome::Ignored,
            PressAction::Recover(_) => match self.recover(pile) {
                Some(card) => PickUpOutcome::Recovered(card),
                None => PickUpOutcome::Ignored,
            },
            PressAction::Drag { start } => {
                let grab_offset = pointer - self.layout.pile_slot(pile, start);
                let run = self.tableau.take_run(pile, start);
                let len = run.len();
                debug!("Picked up {} cards from {} at row {}", len, pile, start);
                self.drag = Some(DragSession {
                    origin: pile,
                    run,
                    grab_offset,
                });
                PickUpOutcome::Dragging(len)
            }
        }
    }

    /// Release the held run over `target`.
    ///
    /// A missing or invalid target bounces the run back to its origin. The
    /// origin's new top card is revealed either way.
    pub fn drop_run(&mut self, target: Option<PileId>) -> DropOutcome {
        let Some(session) = self.drag.take() else {
            return DropOutcome::NoDrag;
        };

        let destination = target.filter(|&pile| is_valid_target(&self.tableau, pile, &session.run));
        let outcome = match destination {
            Some(pile) => {
                self.tableau.place_run(pile, &session.run);
                DropOutcome::Placed(pile)
            }
            None => {
                self.tableau.place_run(session.origin, &session.run);
                DropOutcome::Returned(session.origin)
            }
        };
        self.tableau.reveal_top(session.origin);
        debug!("Dropped {} cards from {}: {:?}", session.run.len(), session.origin, outcome);
        outcome
    }
}
