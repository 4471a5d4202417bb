//! The two-leg shuffle animation used by "deal again" and "retry".
//!
//! ## Phases
//!
//! 1. **Converging**: every card flies from where it was drawn before the
//!    action to one shared staging point. A card that reaches the staging
//!    point plans its second leg immediately, but no card spreads while any
//!    card is still converging.
//! 2. **Spreading**: cards fly from the staging point to their destination,
//!    released in waves. Each tick, only cards whose destination row is at
//!    most the lowest row still in flight towards the last pile may move,
//!    so the layout cascades in from the top rows down.
//!
//! A card leaves the track the tick after its spreading leg completes. The
//! logical piles already hold the post-action layout the whole time.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::card::{CardId, PileId};
use crate::core::geometry::{plan_leg, Vec2};

/// Which leg a shuffled card is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShufflePhase {
    Converging,
    Spreading,
}

/// Where a shuffled card ends its second leg.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub position: Vec2,
    /// Tableau pile of the destination, `None` for a foundation slot.
    pub pile: Option<PileId>,
    /// Row within the pile; gates the spreading wave.
    pub row: usize,
}

/// One card on the shuffle track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShuffleCard {
    pub card: CardId,
    /// Position the card was drawn at before the action.
    pub source: Vec2,
    pub position: Vec2,
    pub step: Vec2,
    pub steps_remaining: u32,
    pub phase: ShufflePhase,
    /// Face state captured before the action changed the model.
    pub snapshot_face_up: bool,
    pub destination: Destination,
}

impl ShuffleCard {
    fn advance(&mut self) {
        if self.steps_remaining > 0 {
            self.position += self.step;
            self.steps_remaining -= 1;
        }
    }

    fn gate_key(&self) -> (usize, usize) {
        let pile = self.destination.pile.map_or(usize::MAX, PileId::index);
        (pile, self.destination.row)
    }
}

/// The pool of cards withdrawn from normal rendering.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShuffleTrack {
    cards: Vec<ShuffleCard>,
    staging: Vec2,
    speed: f32,
}

impl ShuffleTrack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a shuffle. Each entry is `(card, source, snapshot_face_up,
    /// destination)`; every card begins converging on `staging`.
    ///
    /// Cards already on the track are kept; callers only begin a shuffle
    /// when the track is empty.
    pub fn begin(
        &mut self,
        staging: Vec2,
        speed: f32,
        entries: impl IntoIterator<Item = (CardId, Vec2, bool, Destination)>,
    ) {
        self.staging = staging;
        self.speed = speed;
        for (card, source, snapshot_face_up, destination) in entries {
            let (step, steps_remaining) = plan_leg(source, staging, speed, f32::round);
            self.cards.push(ShuffleCard {
                card,
                source,
                position: source,
                step,
                steps_remaining,
                phase: ShufflePhase::Converging,
                snapshot_face_up,
                destination,
            });
        }
        trace!("Shuffle started with {} cards", self.cards.len());
    }

    /// Is a shuffle in progress?
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Is any card still on its first leg?
    #[must_use]
    pub fn is_converging(&self) -> bool {
        self.cards.iter().any(|c| c.phase == ShufflePhase::Converging)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShuffleCard> + '_ {
        self.cards.iter()
    }

    #[must_use]
    pub fn staging_point(&self) -> Vec2 {
        self.staging
    }

    /// Face to draw for a track card: the pre-action face while any card is
    /// converging, the current logical face afterwards.
    #[must_use]
    pub fn display_face_up(&self, entry: &ShuffleCard, logical_face_up: bool) -> bool {
        if self.is_converging() {
            entry.snapshot_face_up
        } else {
            logical_face_up
        }
    }

    /// Advance the track one tick.
    ///
    /// Returns the cards retired this tick.
    pub fn tick(&mut self) -> Vec<CardId> {
        if self.is_converging() {
            self.tick_converging();
            return Vec::new();
        }
        self.tick_spreading()
    }

    fn tick_converging(&mut self) {
        let (staging, speed) = (self.staging, self.speed);
        for card in self.cards.iter_mut().filter(|c| c.phase == ShufflePhase::Converging) {
            if card.steps_remaining == 0 {
                card.position = staging;
                let (step, steps) = plan_leg(staging, card.destination.position, speed, f32::round);
                card.step = step;
                card.steps_remaining = steps;
                card.phase = ShufflePhase::Spreading;
            } else {
                card.advance();
            }
        }
    }

    fn tick_spreading(&mut self) -> Vec<CardId> {
        self.cards.sort_by_key(ShuffleCard::gate_key);
        let threshold = self
            .cards
            .iter()
            .filter(|c| c.destination.pile == Some(PileId::LAST))
            .map(|c| c.destination.row)
            .min()
            .unwrap_or(usize::MAX);

        let mut retired = Vec::new();
        self.cards.retain_mut(|card| {
            let released = card.destination.pile.is_none() || card.destination.row <= threshold;
            if !released {
                return true;
            }
            if card.steps_remaining == 0 {
                trace!("{} settled", card.card);
                retired.push(card.card);
                return false;
            }
            card.advance();
            true
        });
        retired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(x: f32, pile: Option<u8>, row: usize) -> Destination {
        Destination {
            position: Vec2::new(x, 0.0),
            pile: pile.map(PileId),
            row,
        }
    }

    /// Run the track to completion, returning retirements per tick.
    fn drain(track: &mut ShuffleTrack) -> Vec<Vec<CardId>> {
        let mut ticks = Vec::new();
        for _ in 0..10_000 {
            if !track.is_active() {
                return ticks;
            }
            ticks.push(track.tick());
        }
        panic!("shuffle track never emptied");
    }

    #[test]
    fn test_converge_then_spread() {
        let mut track = ShuffleTrack::new();
        let staging = Vec2::new(100.0, 0.0);
        track.begin(staging, 10.0, [(CardId(0), Vec2::ZERO, true, dest(50.0, Some(0), 0))]);

        assert!(track.is_converging());
        assert_eq!(track.iter().next().unwrap().steps_remaining, 10);
        for _ in 0..10 {
            assert!(track.tick().is_empty());
        }
        // Reaching zero steps switches legs on the next tick
        track.tick();
        let card = *track.iter().next().unwrap();
        assert_eq!(card.phase, ShufflePhase::Spreading);
        assert_eq!(card.position, staging);
        assert_eq!(card.steps_remaining, 5);
        assert_eq!(card.step, Vec2::new(-10.0, 0.0));

        let ticks = drain(&mut track);
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks.last().unwrap().as_slice(), &[CardId(0)]);
    }

    #[test]
    fn test_no_card_spreads_while_another_converges() {
        let mut track = ShuffleTrack::new();
        let staging = Vec2::new(100.0, 0.0);
        track.begin(
            staging,
            10.0,
            [
                (CardId(0), Vec2::new(90.0, 0.0), true, dest(0.0, Some(0), 0)),
                (CardId(1), Vec2::ZERO, true, dest(0.0, Some(1), 0)),
            ],
        );

        // Card 0 arrives after one step and switches legs, then waits
        track.tick();
        track.tick();
        for _ in 0..8 {
            track.tick();
            let near = track.iter().find(|c| c.card == CardId(0)).unwrap();
            assert_eq!(near.phase, ShufflePhase::Spreading);
            assert_eq!(near.position, staging);
        }
    }

    #[test]
    fn test_face_follows_snapshot_while_converging() {
        let mut track = ShuffleTrack::new();
        track.begin(Vec2::new(10.0, 0.0), 10.0, [(CardId(5), Vec2::ZERO, false, dest(10.0, Some(2), 0))]);

        let entry = *track.iter().next().unwrap();
        assert!(!track.display_face_up(&entry, true));

        track.tick();
        track.tick();
        assert!(!track.is_converging());
        let entry = *track.iter().next().unwrap();
        assert!(track.display_face_up(&entry, true));
    }

    #[test]
    fn test_last_pile_gates_the_wave() {
        let mut track = ShuffleTrack::new();
        let staging = Vec2::ZERO;
        // Already at staging: spreading starts on the second tick
        track.begin(
            staging,
            10.0,
            [
                (CardId(0), staging, true, dest(30.0, Some(6), 0)),
                (CardId(1), staging, true, dest(30.0, Some(6), 1)),
                (CardId(2), staging, true, dest(30.0, Some(3), 1)),
            ],
        );
        track.tick();
        assert!(!track.is_converging());

        // Row 0 of the last pile holds everyone at row 1 back
        track.tick();
        let held = track.iter().find(|c| c.card == CardId(2)).unwrap();
        assert_eq!(held.position, staging);
        let moving = track.iter().find(|c| c.card == CardId(0)).unwrap();
        assert_eq!(moving.position, Vec2::new(10.0, 0.0));

        let ticks = drain(&mut track);
        let order: Vec<CardId> = ticks.into_iter().flatten().collect();
        assert_eq!(order[0], CardId(0));
        assert_eq!(order, vec![CardId(0), CardId(2), CardId(1)]);
        assert!(!track.is_active());
    }

    #[test]
    fn test_foundation_destinations_are_never_held() {
        let mut track = ShuffleTrack::new();
        let staging = Vec2::ZERO;
        track.begin(
            staging,
            10.0,
            [
                (CardId(0), staging, true, dest(100.0, Some(6), 0)),
                (CardId(13), staging, true, dest(10.0, None, 5)),
            ],
        );
        track.tick();

        track.tick();
        track.tick();
        // The foundation-bound card finished its single step and retired
        assert!(track.iter().all(|c| c.card != CardId(13)));
    }

    #[test]
    fn test_every_card_retires_exactly_once() {
        let mut track = ShuffleTrack::new();
        let entries = (0..20u8).map(|i| {
            let pile = i % 7;
            let row = (i / 7) as usize;
            (
                CardId(i),
                Vec2::new(f32::from(i) * 13.0, 40.0),
                i % 2 == 0,
                dest(f32::from(pile) * 30.0, Some(pile), row),
            )
        });
        track.begin(Vec2::new(300.0, 120.0), 8.0, entries);

        let mut retired: Vec<CardId> = drain(&mut track).into_iter().flatten().collect();
        retired.sort();
        assert_eq!(retired, (0..20u8).map(CardId).collect::<Vec<_>>());
    }
}
