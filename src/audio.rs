//! Audio collaborator seam
//!
//! The core only says *that* something should sound; picking samples, volumes
//! and playback belongs to the sink. A failing sink never reaches the simulation.

use crate::sim::{Color, GameEvent};

/// Sound effect cues raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEffect {
    /// Looping background track, started once per session
    Music,
    /// Player started a chain
    SeedTrigger,
    /// A dot detonated; `count` is its position in the chain
    Detonation { color: Color, count: u32 },
}

impl SoundEffect {
    /// Cue for a tick event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::SeedTriggered { .. } => Some(SoundEffect::SeedTrigger),
            GameEvent::Detonated { color, count, .. } => {
                Some(SoundEffect::Detonation { color, count })
            }
            GameEvent::ChainResolved(_) => None,
        }
    }
}

/// Playback failures reported by a sink
#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioError {
    /// Playback was refused (e.g. no user gesture yet)
    #[error("playback rejected: {0}")]
    Rejected(String),
    #[error("audio output unavailable")]
    Unavailable,
}

/// Fire-and-forget effect player
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError>;
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct MuteAudio;

impl AudioSink for MuteAudio {
    fn play(&mut self, _effect: SoundEffect) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Logs every cue at debug level (headless runs)
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    pub played: u64,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        self.played += 1;
        log::debug!("♪ {:?}", effect);
        Ok(())
    }
}
