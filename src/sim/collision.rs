//! Dot/explosion contact tests
//!
//! Contact is boundary inclusive: circles that exactly touch count. No division
//! by the distance happens here, so a blast spawned on top of a dot is an
//! ordinary hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dot::{Color, Dot};
use super::explosion::Explosion;

/// A dot that was hit this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detonation {
    /// Dot position at the moment it was hit
    pub pos: Vec2,
    pub color: Color,
}

/// Whether the blast reaches the dot
#[inline]
pub fn touches(dot: &Dot, explosion: &Explosion) -> bool {
    dot.pos.distance(explosion.center) <= explosion.radius() + dot.radius
}

/// Mark every live dot reached by any of `explosions`.
///
/// Dots already marked are skipped, so each dot detonates at most once no matter
/// how many blasts overlap it. Marked dots stay in the slice; removal is the
/// caller's batch step.
pub fn detonate_touching(dots: &mut [Dot], explosions: &[Explosion]) -> Vec<Detonation> {
    let mut detonations = Vec::new();
    for dot in dots.iter_mut().filter(|d| !d.exploded) {
        if explosions.iter().any(|e| touches(dot, e)) {
            dot.exploded = true;
            detonations.push(Detonation {
                pos: dot.pos,
                color: dot.color,
            });
        }
    }
    detonations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplosionTiming;

    /// Explosion advanced into its hanging phase (full radius)
    fn full_blast(center: Vec2, max_radius: f32) -> Explosion {
        let timing = ExplosionTiming {
            expand_ms: 10.0,
            hang_ms: 1000.0,
            shrink_ms: 10.0,
        };
        let mut blast = Explosion::new(center, max_radius, timing, Color::White);
        blast.advance(1.0);
        assert_eq!(blast.radius(), max_radius);
        blast
    }

    fn still_dot(x: f32, y: f32, radius: f32) -> Dot {
        Dot::new(Vec2::new(x, y), Vec2::ZERO, radius, Color::Hue(90.0))
    }

    #[test]
    fn test_touch_is_boundary_inclusive() {
        let blast = full_blast(Vec2::ZERO, 40.0);
        // 3-4-5 triangle: distance 50 == 40 + 10
        assert!(touches(&still_dot(30.0, 40.0, 10.0), &blast));
        assert!(!touches(&still_dot(30.0, 40.01, 10.0), &blast));
    }

    #[test]
    fn test_zero_distance_is_hit() {
        let blast = Explosion::new(
            Vec2::new(5.0, 5.0),
            40.0,
            ExplosionTiming::default(),
            Color::White,
        );
        assert_eq!(blast.radius(), 0.0);
        assert!(touches(&still_dot(5.0, 5.0, 1.0), &blast));
    }

    #[test]
    fn test_detonate_marks_once() {
        let blasts = vec![
            full_blast(Vec2::new(100.0, 100.0), 50.0),
            full_blast(Vec2::new(110.0, 100.0), 50.0),
        ];
        let mut dots = vec![
            still_dot(105.0, 100.0, 5.0),
            still_dot(400.0, 400.0, 5.0),
        ];

        let hits = detonate_touching(&mut dots, &blasts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].pos, Vec2::new(105.0, 100.0));
        assert_eq!(hits[0].color, Color::Hue(90.0));
        assert!(dots[0].exploded);
        assert!(!dots[1].exploded);

        // Marked dots are never counted again
        let hits = detonate_touching(&mut dots, &blasts);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_no_explosions_no_hits() {
        let mut dots = vec![still_dot(10.0, 10.0, 5.0)];
        assert!(detonate_touching(&mut dots, &[]).is_empty());
    }
}
