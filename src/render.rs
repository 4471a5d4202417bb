//! Per-frame snapshot of what the renderer draws.
//!
//! The engine never draws anything itself. A host captures a `RenderFrame`
//! after each `Controller::frame` and hands it to its sprite layer.

use serde::{Deserialize, Serialize};

use crate::core::card::{CardId, Rank, Suit, SUIT_COUNT, TABLEAU_PILES};
use crate::core::geometry::Vec2;
use crate::core::state::GameState;

/// One card to draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderCard {
    pub card: CardId,
    /// Top-left corner in screen pixels.
    pub position: Vec2,
    pub face_up: bool,
}

/// Everything visible in one frame, in draw order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Tableau piles, bottom to top. Cards on the shuffle track are left out.
    pub piles: [Vec<RenderCard>; TABLEAU_PILES],

    /// Highest rank shown on each suit's foundation.
    pub foundations: [Option<Rank>; SUIT_COUNT],

    /// Cards flying to their foundation.
    pub flights: Vec<RenderCard>,

    /// Cards on the shuffle track.
    pub shuffling: Vec<RenderCard>,

    /// The held run, drawn under the pointer, base first.
    pub dragged: Vec<RenderCard>,
}

impl RenderFrame {
    /// Capture the current state with the pointer at `pointer`.
    #[must_use]
    pub fn capture(state: &GameState, pointer: Vec2) -> Self {
        let layout = &state.layout;
        let tableau = &state.tableau;
        let mut frame = Self::default();

        for ((pile, cards), out) in tableau.piles().zip(frame.piles.iter_mut()) {
            out.extend(
                cards
                    .iter()
                    .enumerate()
                    .filter(|&(_, &card)| !tableau.cards().in_shuffle(card))
                    .map(|(row, &card)| RenderCard {
                        card,
                        position: layout.pile_slot(pile, row),
                        face_up: tableau.is_face_up(card),
                    }),
            );
        }

        for suit in Suit::all() {
            frame.foundations[suit.index()] = state.foundation.arrived(suit);
        }

        frame.flights = state
            .flights
            .iter()
            .map(|flight| RenderCard {
                card: flight.card,
                position: flight.position,
                face_up: true,
            })
            .collect();

        frame.shuffling = state
            .shuffle
            .iter()
            .map(|entry| RenderCard {
                card: entry.card,
                position: entry.position,
                face_up: state
                    .shuffle
                    .display_face_up(entry, tableau.is_face_up(entry.card)),
            })
            .collect();

        if let Some(drag) = &state.drag {
            let row_height = layout.row_height();
            frame.dragged = drag
                .run
                .iter()
                .enumerate()
                .map(|(k, &card)| RenderCard {
                    card,
                    position: drag.card_position(pointer, k, row_height),
                    face_up: true,
                })
                .collect();
        }

        frame
    }

    /// Number of cards drawn, foundation piles excluded.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Vec::len).sum::<usize>()
            + self.flights.len()
            + self.shuffling.len()
            + self.dragged.len()
    }
}
