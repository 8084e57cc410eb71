//! Live dots and explosions for one level attempt

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Detonation, detonate_touching};
use super::dot::{Color, Dot};
use super::explosion::Explosion;
use super::rng::RandomSource;
use crate::config::{ExplosionTiming, ScaledParams};

/// Owns the live entity sets and advances them one tick at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    bounds: Vec2,
    blast_radius: f32,
    timing: ExplosionTiming,
    dots: Vec<Dot>,
    explosions: Vec<Explosion>,
}

impl Arena {
    /// Empty arena using the sizes in `params`
    pub fn new(params: &ScaledParams) -> Self {
        Self {
            bounds: Vec2::new(params.arena_width, params.arena_height),
            blast_radius: params.explosion_radius,
            timing: params.timing,
            dots: Vec::new(),
            explosions: Vec::new(),
        }
    }

    /// Replace everything with `count` fresh random dots
    pub fn populate(&mut self, params: &ScaledParams, count: u32, rng: &mut impl RandomSource) {
        *self = Self::new(params);
        self.dots.reserve(count as usize);
        for _ in 0..count {
            self.dots.push(Dot::random(
                rng,
                self.bounds,
                params.dot_radius,
                params.min_speed,
                params.max_speed,
            ));
        }
    }

    /// Swap in a prepared dot layout (scripted levels, tests)
    pub fn replace_dots(&mut self, dots: Vec<Dot>) {
        self.dots = dots;
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn blast_radius(&self) -> f32 {
        self.blast_radius
    }

    /// Start a blast at `pos` (radius 0 until the next step)
    pub fn spawn_explosion(&mut self, pos: Vec2, color: Color) {
        self.explosions
            .push(Explosion::new(pos, self.blast_radius, self.timing, color));
    }

    /// Advance dots and explosions by `dt` seconds and run the collision pass.
    ///
    /// Blasts spawned by this tick's detonations join the pass at once: each
    /// round tests only the previous round's new blasts against the dots still
    /// standing, until a round hits nothing. Detonated dots are removed after
    /// the pass.
    pub fn step(&mut self, dt: f32) -> Vec<Detonation> {
        let bounds = self.bounds;
        for dot in &mut self.dots {
            dot.advance(dt, bounds);
        }

        self.explosions.retain_mut(|e| e.advance(dt));

        let mut detonations = Vec::new();
        let mut untested = 0;
        loop {
            let hits = detonate_touching(&mut self.dots, &self.explosions[untested..]);
            if hits.is_empty() {
                break;
            }
            untested = self.explosions.len();
            for d in &hits {
                self.spawn_explosion(d.pos, d.color);
            }
            detonations.extend(hits);
        }
        self.dots.retain(|d| !d.exploded);

        detonations
    }
}
