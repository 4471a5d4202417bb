//! 2D float vector used for card positions and animation steps.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// 2D point or displacement in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or zero for a zero-length vector.
    #[must_use]
    pub fn normalize_or_zero(self) -> Vec2 {
        let len = self.length();
        if len > 0.0 {
            Vec2::new(self.x / len, self.y / len)
        } else {
            Vec2::ZERO
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// A straight-line leg split into equal steps of a fixed speed.
///
/// Returns the per-tick step vector and the number of ticks.
/// A zero-length leg has a zero step and zero ticks.
#[must_use]
pub fn plan_leg(from: Vec2, to: Vec2, speed: f32, ticks: fn(f32) -> f32) -> (Vec2, u32) {
    let delta = to - from;
    let distance = delta.length();
    if distance <= 0.0 || speed <= 0.0 {
        return (Vec2::ZERO, 0);
    }
    let step = delta.normalize_or_zero() * speed;
    (step, ticks(distance / speed) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_distance() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Vec2::new(1.0, 1.0).distance(Vec2::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn test_plan_leg_rounding() {
        let (step, ticks) = plan_leg(Vec2::ZERO, Vec2::new(30.0, 0.0), 8.0, f32::round);
        assert_eq!(step, Vec2::new(8.0, 0.0));
        // 3.75 rounds to 4
        assert_eq!(ticks, 4);

        let (_, ticks) = plan_leg(Vec2::ZERO, Vec2::new(30.0, 0.0), 8.0, f32::floor);
        assert_eq!(ticks, 3);
    }

    #[test]
    fn test_plan_leg_zero_length() {
        let p = Vec2::new(5.0, 5.0);
        assert_eq!(plan_leg(p, p, 8.0, f32::round), (Vec2::ZERO, 0));
    }
}
