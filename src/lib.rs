//! # solitaire-core
//!
//! Rules and animation engine for a single-deck, seven-pile patience game.
//!
//! ## Design Principles
//!
//! 1. **One Aggregate**: All mutable state lives in `GameState`, owned by the
//!    `Controller` and mutated only inside its per-frame update.
//!
//! 2. **Explicit Ownership**: The 52 cards live in a fixed arena indexed by
//!    `CardId`. Piles hold ids, and every card carries an owner tag, so
//!    conservation can be checked mechanically.
//!
//! 3. **Deterministic**: Deals come from an injected seedable RNG, redeals
//!    use no randomness, and every animation runs for a tick count fixed
//!    when it starts.
//!
//! ## Game Rules
//!
//! - Runs are same-suit and descend by exactly one rank. Any face-up card can
//!   be picked up together with the run it ends.
//! - A run may go onto a pile whose top card is the next rank up in the same
//!   suit, or a king-based run onto an empty pile.
//! - Pressing a pile's top card when it is next for its foundation sends it
//!   there instead of picking it up.
//!
//! ## Modules
//!
//! - `core`: Card ids, geometry, RNG, configuration and layout, game state
//! - `zones`: Card arena, tableau piles and deals, foundation counters
//! - `rules`: Move legality, the drag gesture, table actions
//! - `animation`: Flight and shuffle tracks
//! - `controller`: Per-frame input handling and ticking
//! - `render`: Snapshot of what a frame shows
//! - `invariants`: Structural checks used by tests and debug builds

pub mod core;
pub mod zones;
pub mod rules;
pub mod animation;
pub mod controller;
pub mod render;
pub mod invariants;

// Re-export commonly used types
pub use crate::core::{
    CardId, Owner, PileId, Rank, Suit,
    DECK_SIZE, RANKS_PER_SUIT, SUIT_COUNT, TABLEAU_PILES,
    Vec2, DealRng,
    Layout, RedealOrder, SpreadTarget, TableButton, TableConfig,
    GameState,
};

pub use crate::zones::{CardArena, CardRecord, FoundationTracker, Run, Tableau};

pub use crate::rules::{DragSession, DropOutcome, PickUpOutcome, PressAction};

pub use crate::animation::{FlightAnimation, FlightTrack, ShuffleCard, ShufflePhase, ShuffleTrack};

pub use crate::controller::{Controller, FrameOutcome, InputFrame, PointerEdge};

pub use crate::render::{RenderCard, RenderFrame};

pub use crate::invariants::InvariantViolation;
