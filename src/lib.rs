//! Chain Reaction - a cascading-blast puzzle simulation
//!
//! Core modules:
//! - `sim`: Simulation core (dot motion, explosion lifecycle, cascades, levels)
//! - `config`: Difficulty profiles, level rules, viewport scaling
//! - `audio`: Audio collaborator seam
//! - `driver`: Frame driver wiring render/audio/HUD/input collaborators to the core

pub mod audio;
pub mod config;
pub mod driver;
pub mod sim;

pub use config::{Config, ConfigError, ExplosionTiming, LevelRule, Profile};
pub use driver::{DriverConfig, FrameDriver, InputEvent};

/// Default tuning constants (design size 800x600, scale 1.0)
pub mod consts {
    /// Design arena dimensions
    pub const DESIGN_WIDTH: f32 = 800.0;
    pub const DESIGN_HEIGHT: f32 = 600.0;

    /// Dot defaults
    pub const DOT_RADIUS: f32 = 15.0;
    /// Dot speed range (units/second)
    pub const DOT_MIN_SPEED: f32 = 50.0;
    pub const DOT_MAX_SPEED: f32 = 200.0;

    /// Explosion full radius
    pub const EXPLOSION_RADIUS: f32 = 65.0;
    /// Explosion phase durations (milliseconds)
    pub const EXPAND_MS: f32 = 1100.0;
    pub const HANG_MS: f32 = 850.0;
    pub const SHRINK_MS: f32 = 500.0;

    /// Viewports narrower than this use the compact profile
    pub const COMPACT_VIEWPORT_WIDTH: f32 = 600.0;

    /// Delay between cascade resolution and the outcome popup
    pub const OUTCOME_GRACE_MS: f64 = 500.0;
    /// Longest frame delta fed to the simulation (tab switches, debugger stalls)
    pub const MAX_FRAME_MS: f64 = 250.0;
}
