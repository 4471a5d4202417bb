//! Fixed-slot storage for the 52 card records.
//!
//! Piles, the drag hand, and the animation tracks all refer to cards by
//! `CardId`; the mutable per-card state lives here, indexed by id.

use serde::{Deserialize, Serialize};

use crate::core::card::{CardId, Owner, PileId, DECK_SIZE};

/// Runtime state of one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Is the face visible?
    pub face_up: bool,

    /// Current owning collection.
    pub owner: Owner,

    /// Is the card's visual currently driven by the shuffle track?
    pub in_shuffle: bool,
}

/// Arena of all 52 card records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardArena {
    records: [CardRecord; DECK_SIZE],
}

impl Default for CardArena {
    fn default() -> Self {
        Self::new()
    }
}

impl CardArena {
    /// Create an arena with every card face-down in pile 0.
    ///
    /// Callers deal immediately after; this only gives each slot a valid owner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: [CardRecord {
                face_up: false,
                owner: Owner::Tableau(PileId(0)),
                in_shuffle: false,
            }; DECK_SIZE],
        }
    }

    #[must_use]
    pub fn get(&self, card: CardId) -> &CardRecord {
        &self.records[card.index()]
    }

    #[must_use]
    pub fn is_face_up(&self, card: CardId) -> bool {
        self.records[card.index()].face_up
    }

    pub(crate) fn set_face_up(&mut self, card: CardId, face_up: bool) {
        self.records[card.index()].face_up = face_up;
    }

    #[must_use]
    pub fn owner(&self, card: CardId) -> Owner {
        self.records[card.index()].owner
    }

    pub(crate) fn set_owner(&mut self, card: CardId, owner: Owner) {
        self.records[card.index()].owner = owner;
    }

    #[must_use]
    pub fn in_shuffle(&self, card: CardId) -> bool {
        self.records[card.index()].in_shuffle
    }

    pub(crate) fn set_in_shuffle(&mut self, card: CardId, in_shuffle: bool) {
        self.records[card.index()].in_shuffle = in_shuffle;
    }

    /// Iterate over every card with its record.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardRecord)> + '_ {
        CardId::all().zip(self.records.iter())
    }

    /// Cards currently owned by `owner`, in id order.
    pub fn owned_by(&self, owner: Owner) -> impl Iterator<Item = CardId> + '_ {
        self.iter()
            .filter(move |(_, record)| record.owner == owner)
            .map(|(card, _)| card)
    }
}
