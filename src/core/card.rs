//! Card identity, piles, and ownership tags.
//!
//! ## ID Layout
//!
//! A card is an integer `0..52`:
//! - `suit = id / 13` (4 groups of 13)
//! - `rank = id % 13` (0 = lowest, 12 = highest)
//!
//! Two cards of the same suit with adjacent ranks therefore have adjacent ids,
//! which is what the build and run rules compare.
//!
//! ```
//! use solitaire_core::core::{CardId, Rank, Suit};
//!
//! let card = CardId::from_parts(Suit::new(1), Rank::new(0));
//! assert_eq!(card, CardId(13));
//! assert_eq!(card.suit(), Suit::new(1));
//! assert_eq!(card.rank(), Rank::new(0));
//! ```

use serde::{Deserialize, Serialize};

/// Number of cards in the deck.
pub const DECK_SIZE: usize = 52;

/// Number of suits (and foundation piles).
pub const SUIT_COUNT: usize = 4;

/// Number of ranks per suit.
pub const RANKS_PER_SUIT: usize = 13;

/// Number of tableau piles.
pub const TABLEAU_PILES: usize = 7;

/// Suit index `0..4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Suit(pub u8);

impl Suit {
    /// Create a suit from its index.
    ///
    /// Panics if `index >= 4`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < SUIT_COUNT, "Suit index out of range");
        Self(index)
    }

    /// Get the raw suit index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all four suits in index order.
    pub fn all() -> impl Iterator<Item = Suit> {
        (0..SUIT_COUNT as u8).map(Suit)
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Suit({})", self.0)
    }
}

/// Rank `0..13` within a suit. Rank 12 is the king.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    /// The lowest rank, the first card recovered to a foundation.
    pub const ACE: Rank = Rank(0);

    /// The highest rank, the only one allowed onto an empty pile.
    pub const KING: Rank = Rank(12);

    /// Create a rank from its value.
    ///
    /// Panics if `value >= 13`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!((value as usize) < RANKS_PER_SUIT, "Rank out of range");
        Self(value)
    }

    /// Get the raw rank value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_king(self) -> bool {
        self.0 == Self::KING.0
    }

    #[must_use]
    pub const fn is_ace(self) -> bool {
        self.0 == Self::ACE.0
    }
}

/// Unique identifier of one of the 52 cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a card id, returning `None` if `id >= 52`.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < DECK_SIZE {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Build the id of the card with the given suit and rank.
    #[must_use]
    pub const fn from_parts(suit: Suit, rank: Rank) -> Self {
        Self(suit.0 * RANKS_PER_SUIT as u8 + rank.0)
    }

    /// Get the raw id as an index into per-card tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        Suit(self.0 / RANKS_PER_SUIT as u8)
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank(self.0 % RANKS_PER_SUIT as u8)
    }

    /// The card of the same suit one rank higher, if any.
    ///
    /// This is the only card a run starting with `self` may be built onto.
    #[must_use]
    pub const fn next_higher(self) -> Option<CardId> {
        if self.rank().is_king() {
            None
        } else {
            Some(CardId(self.0 + 1))
        }
    }

    /// Iterate over all 52 ids in order.
    pub fn all() -> impl Iterator<Item = CardId> {
        (0..DECK_SIZE as u8).map(CardId)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({}: s{} r{})", self.0, self.suit().0, self.rank().0)
    }
}

/// Tableau pile index `0..7`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PileId(pub u8);

impl PileId {
    /// The right-most pile, which gates the shuffle cascade.
    pub const LAST: PileId = PileId(TABLEAU_PILES as u8 - 1);

    /// Create a pile id, returning `None` if `index >= 7`.
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < TABLEAU_PILES {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seven piles in index order.
    pub fn all() -> impl Iterator<Item = PileId> {
        (0..TABLEAU_PILES as u8).map(PileId)
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// Which collection currently owns a card.
///
/// Owning sets are disjoint: every card has exactly one owner at all times.
/// The shuffle animation is not an owner; it only borrows the visual of a
/// card whose logical owner has already been updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// In a tableau pile.
    Tableau(PileId),
    /// Settled on its foundation.
    Foundation(Suit),
    /// Part of the run held by the active drag session.
    Hand,
    /// Recovered but still flying towards its foundation.
    Flight,
}
