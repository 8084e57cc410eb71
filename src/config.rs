//! Difficulty profiles and level rules
//!
//! A `Config` is chosen once at game start and never mutated. Viewport sizing is
//! applied separately as a uniform scale factor (see `scale_for_viewport`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("level rule list is empty")]
    NoLevels,
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("invalid speed range: min {min}, max {max}")]
    InvalidSpeedRange { min: f32, max: f32 },
    #[error("level {level}: goal {goal} must be within 1..={dot_count}")]
    InvalidGoal { level: usize, goal: u32, dot_count: u32 },
    #[error("arena {width}x{height} cannot hold a dot of radius {dot_radius}")]
    ArenaTooSmall { width: f32, height: f32, dot_radius: f32 },
    #[error("invalid scale factor: {0}")]
    InvalidScale(f32),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
}

/// One level's setup and pass threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRule {
    /// Dots spawned at level start
    pub dot_count: u32,
    /// Minimum detonations to pass
    pub goal: u32,
}

impl LevelRule {
    pub const fn new(dot_count: u32, goal: u32) -> Self {
        Self { dot_count, goal }
    }
}

/// Default level progression
pub const DEFAULT_LEVELS: [LevelRule; 12] = [
    LevelRule::new(5, 1),
    LevelRule::new(10, 2),
    LevelRule::new(15, 3),
    LevelRule::new(20, 5),
    LevelRule::new(25, 7),
    LevelRule::new(30, 10),
    LevelRule::new(35, 15),
    LevelRule::new(40, 21),
    LevelRule::new(45, 27),
    LevelRule::new(50, 33),
    LevelRule::new(55, 44),
    LevelRule::new(60, 55),
];

/// Phase durations of every explosion (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionTiming {
    pub expand_ms: f32,
    pub hang_ms: f32,
    pub shrink_ms: f32,
}

impl Default for ExplosionTiming {
    fn default() -> Self {
        Self {
            expand_ms: EXPAND_MS,
            hang_ms: HANG_MS,
            shrink_ms: SHRINK_MS,
        }
    }
}

impl ExplosionTiming {
    /// Total lifetime of one explosion
    pub fn total_ms(&self) -> f32 {
        self.expand_ms + self.hang_ms + self.shrink_ms
    }
}

/// Difficulty profile presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Profile {
    #[default]
    Desktop,
    /// Narrow viewports: bigger targets, calmer dots
    Compact,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Desktop => "Desktop",
            Profile::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(Profile::Desktop),
            "compact" | "mobile" => Some(Profile::Compact),
            _ => None,
        }
    }

    /// Pick a profile from the viewport width (pixels)
    pub fn for_viewport(width: f32) -> Self {
        if width < COMPACT_VIEWPORT_WIDTH {
            Profile::Compact
        } else {
            Profile::Desktop
        }
    }

    pub fn config(&self) -> Config {
        match self {
            Profile::Desktop => Config::default(),
            Profile::Compact => Config {
                dot_radius: 20.0,
                explosion_radius: 80.0,
                min_speed: 40.0,
                max_speed: 150.0,
                ..Config::default()
            },
        }
    }
}

/// Uniform scale applied to radii, speeds and arena size for a viewport width
pub fn scale_for_viewport(width: f32) -> f32 {
    width.min(DESIGN_WIDTH) / DESIGN_WIDTH
}

/// Immutable per-profile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Arena size in design units
    pub arena_width: f32,
    pub arena_height: f32,
    pub dot_radius: f32,
    /// Full radius of every explosion (seed and detonation)
    pub explosion_radius: f32,
    /// Dot speed range (units/second)
    pub min_speed: f32,
    pub max_speed: f32,
    #[serde(default)]
    pub timing: ExplosionTiming,
    /// Ordered level progression
    pub levels: Vec<LevelRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: DESIGN_WIDTH,
            arena_height: DESIGN_HEIGHT,
            dot_radius: DOT_RADIUS,
            explosion_radius: EXPLOSION_RADIUS,
            min_speed: DOT_MIN_SPEED,
            max_speed: DOT_MAX_SPEED,
            timing: ExplosionTiming::default(),
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config from {} ({} levels)",
            path.as_ref().display(),
            config.levels.len()
        );
        Ok(config)
    }

    /// Check every invariant; an invalid config must never reach the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("dot_radius", self.dot_radius),
            ("explosion_radius", self.explosion_radius),
            ("timing.expand_ms", self.timing.expand_ms),
            ("timing.hang_ms", self.timing.hang_ms),
            ("timing.shrink_ms", self.timing.shrink_ms),
        ];
        for (field, value) in positive {
            // NaN fails the comparison and is rejected too
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let speeds_ok = self.min_speed >= 0.0
            && self.min_speed <= self.max_speed
            && self.max_speed.is_finite();
        if !speeds_ok {
            return Err(ConfigError::InvalidSpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        for (level, rule) in self.levels.iter().enumerate() {
            if rule.dot_count == 0 || rule.goal == 0 || rule.goal > rule.dot_count {
                return Err(ConfigError::InvalidGoal {
                    level,
                    goal: rule.goal,
                    dot_count: rule.dot_count,
                });
            }
        }
        self.check_arena_fits(1.0)
    }

    /// Scaled parameters, rejecting scales that are not finite and positive
    pub fn scaled(&self, scale: f32) -> Result<ScaledParams, ConfigError> {
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(ConfigError::InvalidScale(scale));
        }
        self.check_arena_fits(scale)?;
        Ok(ScaledParams {
            arena_width: self.arena_width * scale,
            arena_height: self.arena_height * scale,
            dot_radius: self.dot_radius * scale,
            explosion_radius: self.explosion_radius * scale,
            min_speed: self.min_speed * scale,
            max_speed: self.max_speed * scale,
            timing: self.timing,
        })
    }

    fn check_arena_fits(&self, scale: f32) -> Result<(), ConfigError> {
        let diameter = 2.0 * self.dot_radius * scale;
        if self.arena_width * scale < diameter || self.arena_height * scale < diameter {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width * scale,
                height: self.arena_height * scale,
                dot_radius: self.dot_radius * scale,
            });
        }
        Ok(())
    }

    /// Rule for a level index (None past the last level)
    pub fn rule(&self, level_index: usize) -> Option<LevelRule> {
        self.levels.get(level_index).copied()
    }
}

/// Config values after viewport scaling, fixed for one level attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledParams {
    pub arena_width: f32,
    pub arena_height: f32,
    pub dot_radius: f32,
    pub explosion_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub timing: ExplosionTiming,
}
