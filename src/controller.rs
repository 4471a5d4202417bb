//! Per-frame glue between host input and the game state.
//!
//! The host calls `Controller::frame` once per rendered frame with the
//! pointer position and any button edge seen since the last frame:
//! - Quit ends the loop without touching state
//! - While the shuffle track runs, input is not processed; the track advances
//! - Otherwise a press picks up, recovers, or hits a table button, and a
//!   release drops the held run
//! - The flight track advances every frame

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::card::PileId;
use crate::core::config::{Layout, TableButton, TableConfig};
use crate::core::geometry::Vec2;
use crate::core::state::GameState;
use crate::render::RenderFrame;
use crate::rules::{DropOutcome, PickUpOutcome};

/// A pointer button transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEdge {
    Pressed,
    Released,
}

/// Input snapshot for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Pointer position in screen pixels.
    pub pointer: Vec2,
    /// Button transition this frame, if any.
    pub edge: Option<PointerEdge>,
    /// Keyboard quit signal.
    pub quit: bool,
}

impl InputFrame {
    /// A frame with the pointer at rest.
    #[must_use]
    pub fn hover(pointer: Vec2) -> Self {
        Self {
            pointer,
            edge: None,
            quit: false,
        }
    }

    #[must_use]
    pub fn press(pointer: Vec2) -> Self {
        Self {
            pointer,
            edge: Some(PointerEdge::Pressed),
            quit: false,
        }
    }

    #[must_use]
    pub fn release(pointer: Vec2) -> Self {
        Self {
            pointer,
            edge: Some(PointerEdge::Released),
            quit: false,
        }
    }

    #[must_use]
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

/// What the host loop should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Owns the game state and drives it one frame at a time.
#[derive(Clone, Debug)]
pub struct Controller {
    state: GameState,
    pointer: Vec2,
    frame_count: u64,
}

impl Controller {
    /// Start a game with a random deal from `config.seed`.
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        info!("Starting table (seed {})", config.seed);
        Self::from_state(GameState::new(config))
    }

    /// Drive an existing state.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            pointer: Vec2::ZERO,
            frame_count: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.state.layout
    }

    /// Frames processed so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Process one frame of input and advance the animations by one tick.
    pub fn frame(&mut self, input: &InputFrame) -> FrameOutcome {
        if input.quit {
            info!("Quit after {} frames", self.frame_count);
            return FrameOutcome::Quit;
        }
        self.frame_count += 1;

        if self.state.shuffle.is_active() {
            self.state.advance_shuffle();
        } else {
            self.handle_input(input);
        }
        self.state.advance_flights();

        debug_assert!(
            !self.state.is_stable() || crate::invariants::check_stable(&self.state).is_ok(),
            "table invariants broken after frame {}",
            self.frame_count
        );
        FrameOutcome::Continue
    }

    /// Snapshot of everything the renderer draws this frame.
    #[must_use]
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.state, self.pointer)
    }

    fn handle_input(&mut self, input: &InputFrame) {
        let inside = self.state.layout.contains(input.pointer);
        if inside {
            self.pointer = input.pointer;
        }

        match input.edge {
            Some(PointerEdge::Pressed) if inside => self.press(input.pointer),
            Some(PointerEdge::Released) => {
                // A release outside the play area still ends the drag
                let target = if inside {
                    self.state.layout.column_at(input.pointer)
                } else {
                    None
                };
                self.release(target);
            }
            _ => {}
        }
    }

    fn press(&mut self, pointer: Vec2) {
        if self.state.drag.is_some() {
            return;
        }

        if let Some(pile) = self.state.layout.column_at(pointer) {
            if let Some(index) = self.pressed_row(pile, pointer) {
                match self.state.pick_up(pile, index, pointer) {
                    PickUpOutcome::Ignored => {}
                    outcome => {
                        debug!("Press on {} row {}: {:?}", pile, index, outcome);
                        return;
                    }
                }
            }
        }

        match self.state.layout.button_at(pointer) {
            Some(TableButton::DealAgain) => {
                self.state.deal_again();
            }
            Some(TableButton::Retry) => {
                self.state.retry();
            }
            None => {}
        }
    }

    /// Pile row under the pointer, snapping presses just below a pile to its
    /// top card.
    fn pressed_row(&self, pile: PileId, pointer: Vec2) -> Option<usize> {
        let len = self.state.pile(pile).len() as isize;
        let row = self.state.layout.row_at(pointer);
        if row < 0 {
            return None;
        }
        if len > 0 && row >= len && row < len + Layout::TOP_CARD_GRACE_ROWS {
            return Some(len as usize - 1);
        }
        (row < len).then_some(row as usize)
    }

    fn release(&mut self, target: Option<PileId>) {
        match self.state.drop_run(target) {
            DropOutcome::NoDrag => {}
            outcome => debug!("Release: {:?}", outcome),
        }
    }
}
