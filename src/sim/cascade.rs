//! Chain-reaction completion detection

use serde::{Deserialize, Serialize};

/// Tracks whether a chain is running and reports the tick it resolves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CascadeTracker {
    active: bool,
    /// Ticks observed since the seed
    ticks: u64,
}

impl CascadeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A seed explosion was spawned
    pub fn begin(&mut self) {
        self.active = true;
        self.ticks = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ticks the current (or last) chain has run
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed the live explosion count after a tick. Returns `true` exactly once
    /// per chain: the first tick the count is zero while a chain is active.
    pub fn observe(&mut self, live_explosions: usize) -> bool {
        if !self.active {
            return false;
        }
        self.ticks += 1;
        if live_explosions == 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Drop any running chain without reporting it
    pub fn clear(&mut self) {
        self.active = false;
        self.ticks = 0;
    }
}
