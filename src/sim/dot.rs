//! Drifting dots with clamp-and-repel wall bounces

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Display color, carried through the simulation untouched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// Seed explosions
    White,
    /// Fully saturated hue in degrees `[0, 360)`
    Hue(f32),
}

/// A moving dot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Set by the collision pass; the dot is removed at the end of that tick
    pub exploded: bool,
}

impl Dot {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
            exploded: false,
        }
    }

    /// Spawn a dot fully inside `bounds`, heading in a random direction
    ///
    /// Draw order: x, y, direction, speed, hue.
    pub fn random(
        rng: &mut impl RandomSource,
        bounds: Vec2,
        radius: f32,
        min_speed: f32,
        max_speed: f32,
    ) -> Self {
        let x = rng.next_range(radius, bounds.x - radius);
        let y = rng.next_range(radius, bounds.y - radius);
        let angle = rng.next_unit() * std::f32::consts::TAU;
        let speed = rng.next_range(min_speed, max_speed);
        let hue = rng.next_unit() * 360.0;
        Self::new(
            Vec2::new(x, y),
            Vec2::from_angle(angle) * speed,
            radius,
            Color::Hue(hue),
        )
    }

    /// Integrate position over `dt` seconds, then keep the whole circle in
    /// `[0, bounds]`.
    ///
    /// A wall contact forces the velocity component to point away from that
    /// wall, so a dot pushed deep past an edge by a long frame cannot stick.
    pub fn advance(&mut self, dt: f32, bounds: Vec2) {
        self.pos += self.vel * dt;

        let r = self.radius;
        if self.pos.x - r < 0.0 {
            self.pos.x = r;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + r > bounds.x {
            self.pos.x = bounds.x - r;
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y - r < 0.0 {
            self.pos.y = r;
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y + r > bounds.y {
            self.pos.y = bounds.y - r;
            self.vel.y = -self.vel.y.abs();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceSource;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_advance_integrates_velocity() {
        let mut dot = Dot::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, -20.0), 10.0, Color::White);
        dot.advance(0.5, BOUNDS);
        assert_eq!(dot.pos, Vec2::new(125.0, 90.0));
        assert_eq!(dot.vel, Vec2::new(50.0, -20.0));
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut dot = Dot::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, -20.0), 10.0, Color::White);
        dot.advance(0.0, BOUNDS);
        assert_eq!(dot.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_bounce_right_wall_repels() {
        let mut dot = Dot::new(Vec2::new(785.0, 300.0), Vec2::new(100.0, 0.0), 10.0, Color::White);
        dot.advance(0.1, BOUNDS);
        assert_eq!(dot.pos.x, 790.0);
        assert!(dot.vel.x < 0.0);
    }

    #[test]
    fn test_large_dt_does_not_tunnel() {
        // A 10 second frame would carry the dot far past the left wall
        let mut dot = Dot::new(
            Vec2::new(50.0, 50.0),
            Vec2::new(-200.0, -200.0),
            15.0,
            Color::White,
        );
        dot.advance(10.0, BOUNDS);
        assert_eq!(dot.pos, Vec2::new(15.0, 15.0));
        assert!(dot.vel.x > 0.0 && dot.vel.y > 0.0);
    }

    #[test]
    fn test_repel_is_not_plain_negation() {
        // Already outside the wall but moving away: negation would send it back in
        let mut dot = Dot::new(Vec2::new(5.0, 300.0), Vec2::new(40.0, 0.0), 10.0, Color::White);
        dot.advance(0.0, BOUNDS);
        assert_eq!(dot.pos.x, 10.0);
        assert_eq!(dot.vel.x, 40.0);
    }

    #[test]
    fn test_random_dot_inset_by_radius() {
        let mut rng = SequenceSource::new(vec![0.0, 0.999, 0.25, 0.5, 0.5]);
        let dot = Dot::random(&mut rng, BOUNDS, 15.0, 50.0, 150.0);
        assert!(dot.pos.x >= 15.0);
        assert!(dot.pos.y <= 600.0 - 15.0);
        assert!((dot.vel.length() - 100.0).abs() < 1e-3);
        // Quarter turn: straight down in screen coordinates
        assert!(dot.vel.x.abs() < 1e-3 && dot.vel.y > 0.0);
        assert_eq!(dot.color, Color::Hue(180.0));
        assert!(!dot.exploded);
    }

    proptest! {
        #[test]
        fn prop_dot_never_escapes(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            radius in 1.0f32..50.0,
            dts in prop::collection::vec(0.0f32..2.0, 1..100),
        ) {
            let mut dot = Dot::new(Vec2::new(x, y), Vec2::new(vx, vy), radius, Color::White);
            for dt in dts {
                dot.advance(dt, BOUNDS);
                prop_assert!(dot.pos.x >= radius && dot.pos.x <= BOUNDS.x - radius);
                prop_assert!(dot.pos.y >= radius && dot.pos.y <= BOUNDS.y - radius);
            }
        }
    }
}
