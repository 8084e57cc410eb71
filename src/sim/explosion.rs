//! Explosion lifecycle: expand, hang, shrink
//!
//! The phase machine is a pure function of `(phase, dt)` so it can be driven by
//! synthetic time in tests. `Explosion` wraps it with a center, a full radius and
//! the derived current radius.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dot::Color;
use crate::config::ExplosionTiming;

/// Fast start, settles into the target
#[inline]
pub fn ease_out(p: f32) -> f32 {
    p * (2.0 - p)
}

/// Slow start, accelerates to the end
#[inline]
pub fn ease_in(p: f32) -> f32 {
    p * p
}

#[inline]
fn progress(elapsed_ms: f32, duration_ms: f32) -> f32 {
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Lifecycle phase with its phase-local elapsed time (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExplosionPhase {
    Expanding { elapsed_ms: f32 },
    Hanging { elapsed_ms: f32 },
    Shrinking { elapsed_ms: f32 },
    /// Shrink complete; the owner drops the explosion
    Finished,
}

impl Default for ExplosionPhase {
    fn default() -> Self {
        ExplosionPhase::Expanding { elapsed_ms: 0.0 }
    }
}

impl ExplosionPhase {
    /// Advance by `dt_ms`, returning the next phase and the radius as a
    /// fraction of the full radius.
    ///
    /// At most one transition happens per step and the phase that is entered
    /// starts at zero elapsed time; leftover time is not carried over.
    pub fn step(self, dt_ms: f32, timing: &ExplosionTiming) -> (Self, f32) {
        match self {
            ExplosionPhase::Expanding { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + dt_ms;
                let p = progress(elapsed_ms, timing.expand_ms);
                if p >= 1.0 {
                    (ExplosionPhase::Hanging { elapsed_ms: 0.0 }, 1.0)
                } else {
                    (ExplosionPhase::Expanding { elapsed_ms }, ease_out(p))
                }
            }
            ExplosionPhase::Hanging { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + dt_ms;
                if elapsed_ms >= timing.hang_ms {
                    (ExplosionPhase::Shrinking { elapsed_ms: 0.0 }, 1.0)
                } else {
                    (ExplosionPhase::Hanging { elapsed_ms }, 1.0)
                }
            }
            ExplosionPhase::Shrinking { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + dt_ms;
                let p = progress(elapsed_ms, timing.shrink_ms);
                if p >= 1.0 {
                    (ExplosionPhase::Finished, 0.0)
                } else {
                    (ExplosionPhase::Shrinking { elapsed_ms }, 1.0 - ease_in(p))
                }
            }
            ExplosionPhase::Finished => (ExplosionPhase::Finished, 0.0),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ExplosionPhase::Finished)
    }
}

/// A circular blast centered on a fixed point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub center: Vec2,
    pub max_radius: f32,
    pub color: Color,
    timing: ExplosionTiming,
    phase: ExplosionPhase,
    radius: f32,
}

impl Explosion {
    pub fn new(center: Vec2, max_radius: f32, timing: ExplosionTiming, color: Color) -> Self {
        Self {
            center,
            max_radius,
            color,
            timing,
            phase: ExplosionPhase::default(),
            radius: 0.0,
        }
    }

    /// Current radius (derived from the phase)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn phase(&self) -> ExplosionPhase {
        self.phase
    }

    /// Advance by `dt` seconds. Returns `false` on the tick the shrink
    /// completes (radius is exactly 0 then); the caller removes it.
    pub fn advance(&mut self, dt: f32) -> bool {
        let (phase, fraction) = self.phase.step(dt * 1000.0, &self.timing);
        self.phase = phase;
        self.radius = if phase.is_finished() {
            0.0
        } else {
            self.max_radius * fraction
        };
        !phase.is_finished()
    }
}
