//! Level attempt state and the events a tick reports

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dot::Color;

/// Outcome of a resolved chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Passed,
    Failed,
}

/// Summary of one resolved level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelResult {
    pub outcome: Outcome,
    /// 0-based level index
    pub level_index: usize,
    pub detonated: u32,
    pub goal: u32,
    pub dot_count: u32,
    /// Total score after this result was applied
    pub total_score: u64,
}

impl LevelResult {
    /// 1-based level number for display
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Waiting for a seed
    Idle,
    /// At least one explosion from the current chain is live
    ChainRunning,
    /// Chain resolved, waiting for restart or advance
    Resolved(LevelResult),
    /// Every level passed, waiting for a reset
    Completed,
}

/// Result of advancing past a passed level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelAdvance {
    /// Next level initialized
    Next { level_index: usize },
    /// No rules left
    GameComplete { total_score: u64 },
}

/// Core-side events produced by one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The pending seed was spawned
    SeedTriggered { pos: Vec2 },
    /// A dot detonated; `count` is the level's running total
    Detonated { pos: Vec2, color: Color, count: u32 },
    /// The chain's explosion set emptied
    ChainResolved(LevelResult),
}

/// Values the HUD shows every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub level_index: usize,
    pub detonated: u32,
    pub goal: u32,
    pub dot_count: u32,
}

/// Progress state across level attempts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level index (0-based)
    pub level_index: usize,
    /// Never decreases except on a full reset
    pub total_score: u64,
    /// Detonations in the current attempt
    pub detonated: u32,
    /// Viewport scale used at the next level initialization
    pub scale: f32,
    pub phase: LevelPhase,
    /// Accepted seed waiting for the next tick
    pub pending_seed: Option<Vec2>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            level_index: 0,
            total_score: 0,
            detonated: 0,
            scale: 1.0,
            phase: LevelPhase::Idle,
            pending_seed: None,
        }
    }
}

impl GameState {
    /// True while a chain is pending or running
    pub fn chain_active(&self) -> bool {
        self.pending_seed.is_some() || self.phase == LevelPhase::ChainRunning
    }

    /// A seed may be queued right now
    pub fn accepts_seed(&self) -> bool {
        self.phase == LevelPhase::Idle && self.pending_seed.is_none()
    }
}
