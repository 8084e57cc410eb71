//! Variable-timestep simulation tick
//!
//! One tick is atomic: apply the pending seed, advance the arena, count
//! detonations, then check whether the chain resolved.

use super::dot::Color;
use super::level::LevelController;
use super::rng::RandomSource;
use super::state::{GameEvent, LevelPhase};

impl<R: RandomSource> LevelController<R> {
    /// Advance the simulation by `dt` seconds; negative or NaN `dt` counts as 0
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.max(0.0);
        let mut events = Vec::new();

        if let Some(pos) = self.state.pending_seed.take() {
            self.arena.spawn_explosion(pos, Color::White);
            self.cascade.begin();
            self.state.phase = LevelPhase::ChainRunning;
            events.push(GameEvent::SeedTriggered { pos });
        }

        for detonation in self.arena.step(dt) {
            self.state.detonated += 1;
            log::debug!(
                "Detonation #{} at ({:.1}, {:.1})",
                self.state.detonated,
                detonation.pos.x,
                detonation.pos.y
            );
            events.push(GameEvent::Detonated {
                pos: detonation.pos,
                color: detonation.color,
                count: self.state.detonated,
            });
        }

        if self.cascade.observe(self.arena.explosions().len()) {
            let result = self.resolve_chain();
            events.push(GameEvent::ChainResolved(result));
        }

        events
    }
}
