//! Table configuration and derived layout geometry.
//!
//! Hosts configure the engine at startup with a `TableConfig`:
//! - Screen size and pile spacing (from which all slot positions derive)
//! - Animation speeds for the flight and shuffle tracks
//! - Which variant of the redeal order and shuffle spread target to use
//!
//! `Layout` is computed once from the config and answers every
//! "where is this slot" and "what is under the pointer" question.

use serde::{Deserialize, Serialize};

use super::card::{PileId, Suit, TABLEAU_PILES};
use super::geometry::Vec2;

/// Order in which `Tableau::redeal` reads the gathered cards back out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedealOrder {
    /// Distribute the gathered sequence front to back.
    #[default]
    Forward,
    /// Distribute the gathered sequence back to front.
    Reversed,
}

/// Where a shuffled card lands when it spreads out of the staging point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadTarget {
    /// The slot the new layout assigns to the card.
    #[default]
    DealtSlot,
    /// The slot the card occupied before the action; the new layout
    /// appears only as each card retires from the track.
    PreviousSlot,
}

/// Table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Play area width in pixels.
    pub screen_width: f32,

    /// Play area height in pixels.
    pub screen_height: f32,

    /// Margin around and between piles.
    pub stack_offset: Vec2,

    /// Pixels per tick for a card flying to its foundation.
    pub flight_speed: f32,

    /// Pixels per tick for both legs of the shuffle animation.
    pub shuffle_speed: f32,

    /// Read order of the redeal sequence.
    pub redeal_order: RedealOrder,

    /// Spread destination of the shuffle animation.
    pub spread_target: SpreadTarget,

    /// Seed for the deal RNG.
    pub seed: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 800.0,
            stack_offset: Vec2::new(10.0, 10.0),
            flight_speed: 20.0,
            shuffle_speed: 8.0,
            redeal_order: RedealOrder::Forward,
            spread_target: SpreadTarget::DealtSlot,
            seed: 42,
        }
    }
}

impl TableConfig {
    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the play area size.
    #[must_use]
    pub fn with_screen(mut self, width: f32, height: f32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the foundation flight speed.
    #[must_use]
    pub fn with_flight_speed(mut self, speed: f32) -> Self {
        self.flight_speed = speed;
        self
    }

    /// Set the shuffle animation speed.
    #[must_use]
    pub fn with_shuffle_speed(mut self, speed: f32) -> Self {
        self.shuffle_speed = speed;
        self
    }

    #[must_use]
    pub fn with_redeal_order(mut self, order: RedealOrder) -> Self {
        self.redeal_order = order;
        self
    }

    #[must_use]
    pub fn with_spread_target(mut self, target: SpreadTarget) -> Self {
        self.spread_target = target;
        self
    }

    /// Derive the slot geometry for this config.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self)
    }
}

/// The two table buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableButton {
    /// Re-lay the current tableau without new randomness.
    DealAgain,
    /// Start a fresh game.
    Retry,
}

/// Slot geometry derived from a `TableConfig`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    screen: Vec2,
    offset: Vec2,
    card_width: f32,
    deal_button: Vec2,
    retry_button: Vec2,
}

impl Layout {
    /// Rows reachable below the last card of a pile that still select it.
    pub const TOP_CARD_GRACE_ROWS: isize = 5;

    /// Compute the layout for a config.
    #[must_use]
    pub fn new(config: &TableConfig) -> Self {
        let offset = config.stack_offset;
        // 7 piles, a gap column, and the foundation column, with 12 margins
        let card_width = (config.screen_width - 12.0 * offset.y) / 9.0;
        let pitch = card_width + offset.x;
        let deal_button = Vec2::new(7.0 * pitch, 0.0) + offset * 2.0;
        let retry_button = Vec2::new(7.0 * pitch, 50.0) + offset * 2.0;

        Self {
            screen: Vec2::new(config.screen_width, config.screen_height),
            offset,
            card_width,
            deal_button,
            retry_button,
        }
    }

    #[must_use]
    pub fn card_width(&self) -> f32 {
        self.card_width
    }

    /// Vertical distance between stacked cards in a pile.
    #[must_use]
    pub fn row_height(&self) -> f32 {
        self.card_width / 3.0
    }

    fn column_pitch(&self) -> f32 {
        self.card_width + self.offset.x
    }

    /// Top-left corner of the card at `index` within `pile`.
    #[must_use]
    pub fn pile_slot(&self, pile: PileId, index: usize) -> Vec2 {
        Vec2::new(
            pile.index() as f32 * self.column_pitch() + self.offset.x,
            index as f32 * self.row_height() + self.offset.y,
        )
    }

    /// Top-left corner of a suit's foundation pile.
    #[must_use]
    pub fn foundation_slot(&self, suit: Suit) -> Vec2 {
        Vec2::new(
            8.0 * self.column_pitch() + 2.0 * self.offset.x,
            suit.index() as f32 * (self.card_width * 2.0 + self.offset.y),
        ) + self.offset
    }

    /// The shared off-table point both shuffle legs pass through.
    #[must_use]
    pub fn staging_point(&self) -> Vec2 {
        self.retry_button * 2.0 - self.deal_button
    }

    #[must_use]
    pub fn button_origin(&self, button: TableButton) -> Vec2 {
        match button {
            TableButton::DealAgain => self.deal_button,
            TableButton::Retry => self.retry_button,
        }
    }

    /// Button width and height.
    #[must_use]
    pub fn button_size(&self) -> Vec2 {
        Vec2::new(self.card_width, self.card_width * 11.0 / 32.0)
    }

    /// Whether a pointer position lies inside the play area.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x < self.screen.x && point.y >= 0.0 && point.y < self.screen.y
    }

    /// Tableau column under the pointer, if any.
    ///
    /// Floors, so the margin left of pile 0 is not a column.
    #[must_use]
    pub fn column_at(&self, point: Vec2) -> Option<PileId> {
        let column = ((point.x - self.offset.x) / self.column_pitch()).floor();
        if column < 0.0 || column >= TABLEAU_PILES as f32 {
            return None;
        }
        PileId::new(column as usize)
    }

    /// Pile row under the pointer. May be negative or past the pile's end;
    /// the margin above row 0 is row -1.
    #[must_use]
    pub fn row_at(&self, point: Vec2) -> isize {
        ((point.y - self.offset.y) / self.row_height()).floor() as isize
    }

    /// Button under the pointer, if any.
    #[must_use]
    pub fn button_at(&self, point: Vec2) -> Option<TableButton> {
        let size = self.button_size();
        [TableButton::DealAgain, TableButton::Retry]
            .into_iter()
            .find(|&button| {
                let origin = self.button_origin(button);
                point.x >= origin.x
                    && point.x < origin.x + size.x
                    && point.y >= origin.y
                    && point.y < origin.y + size.y
            })
    }
}
