//! Level progression: initialization, seeds, pass/fail, advance, reset

use glam::Vec2;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::cascade::CascadeTracker;
use super::dot::Dot;
use super::rng::RandomSource;
use super::state::{GameState, HudSnapshot, LevelAdvance, LevelPhase, LevelResult, Outcome};
use crate::config::{Config, ConfigError, LevelRule, ScaledParams};

/// Owns the arena and all progress state for one game session
pub struct LevelController<R: RandomSource = Pcg32> {
    config: Config,
    /// Scaled values in effect for the current attempt
    params: ScaledParams,
    rng: R,
    pub(super) arena: Arena,
    pub(super) cascade: CascadeTracker,
    pub(super) state: GameState,
}

impl<R: RandomSource> LevelController<R> {
    /// Validate `config` and set up level 0 at scale 1
    pub fn new(config: Config, rng: R) -> Result<Self, ConfigError> {
        Self::with_scale(config, 1.0, rng)
    }

    pub fn with_scale(config: Config, scale: f32, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = config.scaled(scale)?;
        let mut controller = Self {
            arena: Arena::new(&params),
            params,
            config,
            rng,
            cascade: CascadeTracker::new(),
            state: GameState {
                scale,
                ..GameState::default()
            },
        };
        controller.init_level();
        Ok(controller)
    }

    /// Fresh dot set for the current level; clears the attempt's counter
    pub fn init_level(&mut self) {
        // Scales are validated on entry, so this only refreshes the cached values
        if let Ok(params) = self.config.scaled(self.state.scale) {
            self.params = params;
        }
        let rule = self.current_rule();
        self.arena.populate(&self.params, rule.dot_count, &mut self.rng);
        self.cascade.clear();
        self.state.detonated = 0;
        self.state.pending_seed = None;
        self.state.phase = LevelPhase::Idle;
        log::info!(
            "Level {} ready: {} dots, goal {} (scale {:.2})",
            self.state.level_index + 1,
            rule.dot_count,
            rule.goal,
            self.state.scale
        );
    }

    /// Replay the current level with a fresh dot set.
    ///
    /// Allowed while idle or after a failed chain; a passed level must be
    /// advanced instead.
    pub fn restart_level(&mut self) -> bool {
        if self.state.chain_active() {
            log::warn!("Restart ignored: chain in progress");
            return false;
        }
        match self.state.phase {
            LevelPhase::Idle => {}
            LevelPhase::Resolved(result) if !result.passed() => {}
            phase => {
                log::warn!("Restart ignored in phase {:?}", phase);
                return false;
            }
        }
        self.init_level();
        true
    }

    /// Queue a seed explosion at `(x, y)` for the next tick.
    ///
    /// Returns `false` (and changes nothing) unless the controller is idle with
    /// no seed already pending.
    pub fn trigger_seed(&mut self, x: f32, y: f32) -> bool {
        if !self.state.accepts_seed() {
            log::debug!("Seed at ({:.1}, {:.1}) ignored: {:?}", x, y, self.state.phase);
            return false;
        }
        self.state.pending_seed = Some(Vec2::new(x, y));
        log::debug!("Seed accepted at ({:.1}, {:.1})", x, y);
        true
    }

    /// Move past a passed level. `None` if the last chain did not pass.
    pub fn advance_to_next_level(&mut self) -> Option<LevelAdvance> {
        match self.state.phase {
            LevelPhase::Resolved(result) if result.passed() => {}
            phase => {
                log::warn!("Advance ignored in phase {:?}", phase);
                return None;
            }
        }

        let next = self.state.level_index + 1;
        if self.config.rule(next).is_none() {
            self.state.phase = LevelPhase::Completed;
            log::info!("All {} levels complete, score {}", next, self.state.total_score);
            return Some(LevelAdvance::GameComplete {
                total_score: self.state.total_score,
            });
        }

        self.state.level_index = next;
        self.init_level();
        Some(LevelAdvance::Next { level_index: next })
    }

    /// Back to level 0 with a zero score. Refused while a chain is running.
    pub fn reset_game(&mut self) -> bool {
        if self.state.chain_active() {
            log::warn!("Reset ignored: chain in progress");
            return false;
        }
        self.state.level_index = 0;
        self.state.total_score = 0;
        log::info!("Game reset");
        self.init_level();
        true
    }

    /// Set the viewport scale used from the next level initialization on
    pub fn set_scale(&mut self, scale: f32) -> Result<(), ConfigError> {
        self.config.scaled(scale)?;
        if scale != self.state.scale {
            log::debug!("Scale {:.2} -> {:.2}", self.state.scale, scale);
        }
        self.state.scale = scale;
        Ok(())
    }

    /// Swap the random layout for a prepared one (scripted levels, tests)
    pub fn replace_dots(&mut self, dots: Vec<Dot>) {
        self.arena.replace_dots(dots);
    }

    /// Decide pass/fail for the chain that just emptied its explosion set
    pub(super) fn resolve_chain(&mut self) -> LevelResult {
        let rule = self.current_rule();
        let detonated = self.state.detonated;
        let outcome = if detonated >= rule.goal {
            self.state.total_score += u64::from(detonated);
            Outcome::Passed
        } else {
            Outcome::Failed
        };
        let result = LevelResult {
            outcome,
            level_index: self.state.level_index,
            detonated,
            goal: rule.goal,
            dot_count: rule.dot_count,
            total_score: self.state.total_score,
        };
        self.state.phase = LevelPhase::Resolved(result);
        log::info!(
            "Level {} {:?}: {}/{} detonated in {} ticks, score {}",
            result.level_number(),
            outcome,
            detonated,
            rule.goal,
            self.cascade.ticks(),
            result.total_score
        );
        result
    }

    pub fn current_rule(&self) -> LevelRule {
        // level_index never leaves the rule table
        self.config.levels[self.state.level_index]
    }

    pub fn hud(&self) -> HudSnapshot {
        let rule = self.current_rule();
        HudSnapshot {
            score: self.state.total_score,
            level_index: self.state.level_index,
            detonated: self.state.detonated,
            goal: rule.goal,
            dot_count: rule.dot_count,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn params(&self) -> &ScaledParams {
        &self.params
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> LevelPhase {
        self.state.phase
    }

    pub fn chain_active(&self) -> bool {
        self.state.chain_active()
    }
}
