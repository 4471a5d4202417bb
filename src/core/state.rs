//! The game state aggregate.
//!
//! ## GameState
//!
//! Everything the engine mutates lives here, owned by the controller's
//! single update step:
//! - Tableau (piles and the card arena)
//! - Foundation counters
//! - The drag session, if a run is being held
//! - Both animation tracks
//! - The deal RNG
//!
//! Moves are implemented across the `rules` and `animation` modules as
//! methods on `GameState`. Fields are crate-private, so outside the crate
//! the state only changes through those moves.

use super::card::{CardId, Owner, PileId, Rank, Suit, DECK_SIZE, SUIT_COUNT, TABLEAU_PILES};
use super::config::{Layout, TableConfig};
use super::rng::DealRng;
use crate::animation::{FlightTrack, ShuffleTrack};
use crate::rules::DragSession;
use crate::zones::{FoundationTracker, Tableau};

/// Complete engine state.
///
/// Cards can only be moved through the state's own operations; the raw pile
/// mutators are not reachable from outside the crate:
///
/// ```compile_fail
/// use solitaire_core::core::{GameState, PileId, TableConfig};
///
/// let mut state = GameState::new(TableConfig::default());
/// let _ = state.tableau.take_run(PileId(3), 6);
/// ```
///
/// ```compile_fail
/// use solitaire_core::core::{CardId, GameState, Owner, TableConfig};
///
/// let mut tableau = GameState::new(TableConfig::default()).tableau().clone();
/// tableau.cards_mut().set_owner(CardId(5), Owner::Hand);
/// ```
#[derive(Clone, Debug)]
pub struct GameState {
    /// Table configuration.
    pub(crate) config: TableConfig,

    /// Slot geometry derived from `config`.
    pub(crate) layout: Layout,

    /// Piles and card records.
    pub(crate) tableau: Tableau,

    /// Foundation counters.
    pub(crate) foundation: FoundationTracker,

    /// The held run, if any. At most one exists.
    pub(crate) drag: Option<DragSession>,

    /// Cards flying to their foundation.
    pub(crate) flights: FlightTrack,

    /// Cards on the deal/retry shuffle animation.
    pub(crate) shuffle: ShuffleTrack,

    /// Deal RNG.
    pub(crate) rng: DealRng,
}

impl GameState {
    /// Create a game with a random deal seeded from `config.seed`.
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        let mut rng = DealRng::new(config.seed);
        let tableau = Tableau::dealt(&mut rng);
        Self::assemble(config, tableau, FoundationTracker::new(), rng)
    }

    /// Create a game dealt from an explicit deck order.
    ///
    /// Panics if `order` is not a permutation of all 52 cards.
    #[must_use]
    pub fn from_order(config: TableConfig, order: &[CardId]) -> Self {
        let rng = DealRng::new(config.seed);
        let tableau = Tableau::from_order(order);
        Self::assemble(config, tableau, FoundationTracker::new(), rng)
    }

    /// Create a game from explicit pile contents `(card, face_up)`.
    ///
    /// Cards not listed are treated as already recovered; for each suit they
    /// must be the lowest ranks, with no gaps.
    ///
    /// Panics if a card is listed twice or a suit's missing cards leave a gap.
    #[must_use]
    pub fn from_piles(config: TableConfig, piles: [Vec<(CardId, bool)>; TABLEAU_PILES]) -> Self {
        let tableau = Tableau::from_piles(piles);

        let mut highest: [Option<Rank>; SUIT_COUNT] = [None; SUIT_COUNT];
        for suit in Suit::all() {
            let home = tableau
                .cards()
                .owned_by(Owner::Foundation(suit))
                .count();
            for rank in 0..home as u8 {
                let card = CardId::from_parts(suit, Rank(rank));
                assert_eq!(
                    tableau.cards().owner(card),
                    Owner::Foundation(suit),
                    "{} missing from the layout but {} is present",
                    card,
                    suit
                );
            }
            highest[suit.index()] = home.checked_sub(1).map(|r| Rank(r as u8));
        }

        let rng = DealRng::new(config.seed);
        Self::assemble(config, tableau, FoundationTracker::with_recovered(highest), rng)
    }

    fn assemble(config: TableConfig, tableau: Tableau, foundation: FoundationTracker, rng: DealRng) -> Self {
        Self {
            layout: config.layout(),
            config,
            tableau,
            foundation,
            drag: None,
            flights: FlightTrack::new(),
            shuffle: ShuffleTrack::new(),
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Piles and card records.
    #[must_use]
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    #[must_use]
    pub fn foundation(&self) -> &FoundationTracker {
        &self.foundation
    }

    /// The held run, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[must_use]
    pub fn flights(&self) -> &FlightTrack {
        &self.flights
    }

    #[must_use]
    pub fn shuffle(&self) -> &ShuffleTrack {
        &self.shuffle
    }

    /// No drag and no animation in progress.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.drag.is_none() && self.flights.is_empty() && !self.shuffle.is_active()
    }

    /// Is pointer input currently accepted?
    ///
    /// The table is not addressable while the shuffle track is running.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        !self.shuffle.is_active()
    }

    /// Cards of a pile, bottom to top.
    #[must_use]
    pub fn pile(&self, pile: PileId) -> &[CardId] {
        self.tableau.pile(pile)
    }

    /// Number of cards not in the tableau or the hand.
    #[must_use]
    pub fn recovered_total(&self) -> usize {
        let held = self.drag.as_ref().map_or(0, |d| d.run.len());
        DECK_SIZE - self.tableau.card_count() - held
    }
}
