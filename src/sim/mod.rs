//! Simulation core
//!
//! All gameplay logic lives here, free of rendering and platform concerns:
//! - Variable timestep supplied by the caller, one atomic tick at a time
//! - Randomness only through an injected `RandomSource`
//! - Read-only access to live entities for collaborators

pub mod arena;
pub mod cascade;
pub mod collision;
pub mod dot;
pub mod explosion;
pub mod level;
pub mod rng;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use cascade::CascadeTracker;
pub use collision::{Detonation, detonate_touching, touches};
pub use dot::{Color, Dot};
pub use explosion::{Explosion, ExplosionPhase, ease_in, ease_out};
pub use level::LevelController;
pub use rng::{RandomSource, SequenceSource};
pub use state::{
    GameEvent, GameState, HudSnapshot, LevelAdvance, LevelPhase, LevelResult, Outcome,
};
