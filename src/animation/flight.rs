//! Point-to-point flights of recovered cards to their foundation slot.

use log::trace;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::card::CardId;
use crate::core::geometry::{plan_leg, Vec2};

/// One card flying to its foundation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightAnimation {
    pub card: CardId,
    pub position: Vec2,
    /// Displacement applied each tick.
    pub step: Vec2,
    pub steps_remaining: u32,
}

impl FlightAnimation {
    /// Plan a flight from `from` to `to` at `speed` pixels per tick.
    ///
    /// The tick count is the whole number of full steps that fit the distance.
    #[must_use]
    pub fn launch(card: CardId, from: Vec2, to: Vec2, speed: f32) -> Self {
        let (step, steps_remaining) = plan_leg(from, to, speed, f32::floor);
        Self {
            card,
            position: from,
            step,
            steps_remaining,
        }
    }

    /// Advance one tick. Returns true once the flight has landed.
    pub fn advance(&mut self) -> bool {
        if self.steps_remaining > 0 {
            self.position += self.step;
            self.steps_remaining -= 1;
        }
        self.steps_remaining == 0
    }
}

/// All flights currently in the air.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightTrack {
    flights: Vec<FlightAnimation>,
}

impl FlightTrack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launch(&mut self, flight: FlightAnimation) {
        trace!("Launching {} for {} ticks", flight.card, flight.steps_remaining);
        self.flights.push(flight);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlightAnimation> + '_ {
        self.flights.iter()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.flights.iter().any(|f| f.card == card)
    }

    /// Advance every flight one tick.
    ///
    /// Returns the cards that landed this tick, in launch order.
    pub fn tick(&mut self) -> SmallVec<[CardId; 4]> {
        let mut landed = SmallVec::new();
        self.flights.retain_mut(|flight| {
            if flight.advance() {
                trace!("{} landed", flight.card);
                landed.push(flight.card);
                false
            } else {
                true
            }
        });
        landed
    }
}
