//! Frame driver: feeds timestamps and input to the core, fans results out to
//! collaborators
//!
//! Input arrives between frames through an `InputQueue` and is applied before
//! the tick, so collaborators never observe a half-advanced arena. Outcome
//! notices are held back by a grace period; the core's own state changes the
//! moment the chain resolves.

use rand_pcg::Pcg32;

use crate::audio::{AudioSink, SoundEffect};
use crate::config::scale_for_viewport;
use crate::consts::{MAX_FRAME_MS, OUTCOME_GRACE_MS};
use crate::sim::{
    Dot, Explosion, GameEvent, HudSnapshot, LevelAdvance, LevelController, LevelResult,
    RandomSource,
};

/// Draws the live entities once per frame
pub trait Renderer {
    fn draw(&mut self, dots: &[Dot], explosions: &[Explosion]);
}

/// Score board and popups
pub trait Hud {
    /// Called once per frame
    fn update(&mut self, snapshot: &HudSnapshot);
    /// Level outcome popups
    fn notify(&mut self, notice: &Notice);
}

/// Popup-worthy outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LevelPassed(LevelResult),
    /// The level restarts right after this is shown
    LevelFailed(LevelResult),
    GameComplete { total_score: u64 },
}

/// Input delivered between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Click/tap at arena coordinates
    Pointer { x: f32, y: f32 },
    /// Popup dismissed
    Acknowledge,
    /// Viewport resized (pixels)
    Resize { viewport_width: f32 },
}

/// Events queued by the platform layer, drained each frame
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Driver timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    /// Delay between chain resolution and its notice
    pub outcome_grace_ms: f64,
    /// Frame deltas are clamped to this
    pub max_frame_ms: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            outcome_grace_ms: OUTCOME_GRACE_MS,
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

/// What the driver is waiting for between chains
#[derive(Debug, Clone, Copy, PartialEq)]
enum Awaiting {
    Nothing,
    /// Notice scheduled for `due_ms`
    Notice { notice: Notice, due_ms: f64 },
    /// Pass popup shown; acknowledgment advances
    Advance,
    /// Completion popup shown; acknowledgment resets
    Reset,
}

/// Owns the controller and its collaborators
pub struct FrameDriver<V, A, H, R = Pcg32>
where
    V: Renderer,
    A: AudioSink,
    H: Hud,
    R: RandomSource,
{
    controller: LevelController<R>,
    renderer: V,
    audio: A,
    hud: H,
    inputs: InputQueue,
    config: DriverConfig,
    last_time: Option<f64>,
    awaiting: Awaiting,
    frames: u64,
}

impl<V, A, H, R> FrameDriver<V, A, H, R>
where
    V: Renderer,
    A: AudioSink,
    H: Hud,
    R: RandomSource,
{
    pub fn new(
        controller: LevelController<R>,
        renderer: V,
        audio: A,
        hud: H,
        config: DriverConfig,
    ) -> Self {
        Self {
            controller,
            renderer,
            audio,
            hud,
            inputs: InputQueue::new(),
            config,
            last_time: None,
            awaiting: Awaiting::Nothing,
            frames: 0,
        }
    }

    /// Queue input for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }

    /// Run one frame at `timestamp_ms` (monotonic clock). The first frame
    /// advances by zero.
    pub fn frame(&mut self, timestamp_ms: f64) -> Vec<GameEvent> {
        let dt_ms = match self.last_time {
            Some(last) => (timestamp_ms - last).clamp(0.0, self.config.max_frame_ms),
            None => 0.0,
        };
        if self.last_time.is_none() {
            self.play(SoundEffect::Music);
        }
        self.last_time = Some(timestamp_ms);

        for event in self.inputs.drain() {
            self.handle_input(event);
        }

        let events = self.controller.tick((dt_ms / 1000.0) as f32);
        for event in &events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
            if let GameEvent::ChainResolved(result) = event {
                let notice = if result.passed() {
                    Notice::LevelPassed(*result)
                } else {
                    Notice::LevelFailed(*result)
                };
                self.awaiting = Awaiting::Notice {
                    notice,
                    due_ms: timestamp_ms + self.config.outcome_grace_ms,
                };
            }
        }

        self.deliver_due_notice(timestamp_ms);

        let arena = self.controller.arena();
        self.renderer.draw(arena.dots(), arena.explosions());
        self.hud.update(&self.controller.hud());

        self.frames += 1;
        log::trace!(
            "frame {} dt={:.2}ms dots={} explosions={}",
            self.frames,
            dt_ms,
            arena.dots().len(),
            arena.explosions().len()
        );
        events
    }

    /// Audio trouble is the sink's problem, never the simulation's
    fn play(&mut self, effect: SoundEffect) {
        if let Err(e) = self.audio.play(effect) {
            log::warn!("Audio cue {:?} failed: {}", effect, e);
        }
    }

    fn deliver_due_notice(&mut self, now_ms: f64) {
        let Awaiting::Notice { notice, due_ms } = self.awaiting else {
            return;
        };
        if now_ms < due_ms {
            return;
        }
        self.hud.notify(&notice);
        self.awaiting = match notice {
            Notice::LevelFailed(_) => {
                self.controller.restart_level();
                Awaiting::Nothing
            }
            Notice::LevelPassed(_) => Awaiting::Advance,
            Notice::GameComplete { .. } => Awaiting::Reset,
        };
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pointer { x, y } => {
                self.controller.trigger_seed(x, y);
            }
            InputEvent::Acknowledge => match self.awaiting {
                Awaiting::Advance => {
                    self.awaiting = Awaiting::Nothing;
                    if let Some(LevelAdvance::GameComplete { total_score }) =
                        self.controller.advance_to_next_level()
                    {
                        self.hud.notify(&Notice::GameComplete { total_score });
                        self.awaiting = Awaiting::Reset;
                    }
                }
                Awaiting::Reset => {
                    self.controller.reset_game();
                    self.awaiting = Awaiting::Nothing;
                }
                Awaiting::Nothing | Awaiting::Notice { .. } => {
                    log::warn!("Acknowledge ignored: no popup showing");
                }
            },
            InputEvent::Resize { viewport_width } => {
                let scale = scale_for_viewport(viewport_width);
                if let Err(e) = self.controller.set_scale(scale) {
                    log::warn!("Resize to {}px rejected: {}", viewport_width, e);
                }
            }
        }
    }

    /// A popup is showing and waits for the player
    pub fn awaiting_acknowledgment(&self) -> bool {
        matches!(self.awaiting, Awaiting::Advance | Awaiting::Reset)
    }

    /// An outcome notice is inside its grace period
    pub fn notice_pending(&self) -> bool {
        matches!(self.awaiting, Awaiting::Notice { .. })
    }

    pub fn controller(&self) -> &LevelController<R> {
        &self.controller
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::audio::AudioError;
    use crate::config::{Config, LevelRule};
    use crate::sim::{Color, LevelPhase, Outcome, SequenceSource};

    #[derive(Default)]
    struct CountingRenderer {
        draws: usize,
        last_dots: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, dots: &[Dot], _explosions: &[Explosion]) {
            self.draws += 1;
            self.last_dots = dots.len();
        }
    }

    /// Rejects every cue, like a browser before the first gesture
    #[derive(Default)]
    struct RefusingAudio {
        attempts: Vec<SoundEffect>,
    }

    impl AudioSink for RefusingAudio {
        fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
            self.attempts.push(effect);
            Err(AudioError::Rejected("no user gesture".into()))
        }
    }

    #[derive(Default)]
    struct RecordingHud {
        updates: usize,
        last: Option<HudSnapshot>,
        notices: Vec<Notice>,
    }

    impl Hud for RecordingHud {
        fn update(&mut self, snapshot: &HudSnapshot) {
            self.updates += 1;
            self.last = Some(*snapshot);
        }

        fn notify(&mut self, notice: &Notice) {
            self.notices.push(*notice);
        }
    }

    type TestDriver = FrameDriver<CountingRenderer, RefusingAudio, RecordingHud, SequenceSource>;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn driver(levels: Vec<LevelRule>, near: Vec<Dot>) -> TestDriver {
        let config = Config {
            explosion_radius: 60.0,
            min_speed: 0.0,
            max_speed: 0.0,
            levels,
            ..Config::default()
        };
        let mut controller =
            LevelController::new(config, SequenceSource::new(vec![0.9, 0.9, 0.0, 0.0, 0.0]))
                .unwrap();
        controller.replace_dots(near);
        FrameDriver::new(
            controller,
            CountingRenderer::default(),
            RefusingAudio::default(),
            RecordingHud::default(),
            DriverConfig::default(),
        )
    }

    fn near_dot() -> Dot {
        Dot::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 10.0, Color::Hue(0.0))
    }

    /// Step frames until `done` holds, returning the timestamp reached
    fn run_until(d: &mut TestDriver, mut now: f64, done: impl Fn(&TestDriver) -> bool) -> f64 {
        for _ in 0..10_000 {
            if done(d) {
                return now;
            }
            now += FRAME_MS;
            d.frame(now);
        }
        panic!("condition never reached");
    }

    #[test]
    fn test_input_queue() {
        let mut queue = InputQueue::new();
        assert!(queue.is_empty());
        queue.push(InputEvent::Acknowledge);
        queue.push(InputEvent::Pointer { x: 1.0, y: 2.0 });
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![InputEvent::Acknowledge, InputEvent::Pointer { x: 1.0, y: 2.0 }]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_every_frame_draws_and_updates_hud() {
        let mut d = driver(vec![LevelRule::new(1, 1)], vec![near_dot()]);
        d.frame(0.0);
        d.frame(FRAME_MS);
        assert_eq!(d.renderer().draws, 2);
        assert_eq!(d.renderer().last_dots, 1);
        assert_eq!(d.hud().updates, 2);
        assert_eq!(
            d.hud().last,
            Some(HudSnapshot {
                score: 0,
                level_index: 0,
                detonated: 0,
                goal: 1,
                dot_count: 1,
            })
        );
    }

    #[test]
    fn test_audio_failure_does_not_affect_simulation() {
        let mut d = driver(vec![LevelRule::new(1, 1)], vec![near_dot()]);
        d.frame(0.0);
        d.push_input(InputEvent::Pointer { x: 0.0, y: 0.0 });
        run_until(&mut d, 0.0, |d| d.controller().state().detonated == 1);
        // Music, seed and detonation cues were all attempted and refused
        assert_eq!(d.audio().attempts.len(), 3);
        assert_eq!(d.controller().phase(), LevelPhase::ChainRunning);
    }

    #[test]
    fn test_music_starts_once_and_rejection_is_harmless() {
        let mut d = driver(vec![LevelRule::new(1, 1)], vec![near_dot()]);
        d.frame(0.0);
        assert_eq!(d.audio().attempts, vec![SoundEffect::Music]);

        d.push_input(InputEvent::Pointer { x: 0.0, y: 0.0 });
        run_until(&mut d, 0.0, |d| d.notice_pending());
        assert_eq!(d.controller().state().total_score, 1);
        let music = d
            .audio()
            .attempts
            .iter()
            .filter(|e| **e == SoundEffect::Music)
            .count();
        assert_eq!(music, 1);
        assert!(d.renderer().draws > 1);
    }

    #[test]
    fn test_pass_notice_waits_for_grace_then_ack() {
        let mut d = driver(vec![LevelRule::new(1, 1), LevelRule::new(1, 1)], vec![near_dot()]);
        d.frame(0.0);
        d.push_input(InputEvent::Pointer { x: 0.0, y: 0.0 });
        let resolved_at = run_until(&mut d, 0.0, |d| d.notice_pending());

        // Core state is final immediately; the popup is not
        assert_eq!(d.controller().state().total_score, 1);
        assert!(d.hud().notices.is_empty());

        // Early acknowledgment is ignored
        d.push_input(InputEvent::Acknowledge);
        d.frame(resolved_at + 100.0);
        assert!(matches!(d.controller().phase(), LevelPhase::Resolved(_)));

        d.frame(resolved_at + OUTCOME_GRACE_MS);
        assert_eq!(d.hud().notices.len(), 1);
        assert!(matches!(d.hud().notices[0], Notice::LevelPassed(r) if r.detonated == 1));
        assert!(d.awaiting_acknowledgment());

        d.push_input(InputEvent::Acknowledge);
        d.frame(resolved_at + OUTCOME_GRACE_MS + FRAME_MS);
        assert_eq!(d.controller().state().level_index, 1);
        assert_eq!(d.controller().phase(), LevelPhase::Idle);
        assert!(!d.awaiting_acknowledgment());
    }

    #[test]
    fn test_fail_notice_restarts_level() {
        let mut d = driver(vec![LevelRule::new(2, 2)], vec![near_dot()]);
        d.frame(0.0);
        d.push_input(InputEvent::Pointer { x: 0.0, y: 0.0 });
        let now = run_until(&mut d, 0.0, |d| d.notice_pending());
        run_until(&mut d, now, |d| !d.hud().notices.is_empty());

        assert!(matches!(
            d.hud().notices[0],
            Notice::LevelFailed(r) if r.outcome == Outcome::Failed && r.detonated == 1
        ));
        assert_eq!(d.controller().phase(), LevelPhase::Idle);
        assert_eq!(d.controller().arena().dots().len(), 2);
        assert_eq!(d.controller().state().total_score, 0);
        assert!(!d.awaiting_acknowledgment());
    }

    #[test]
    fn test_completion_then_reset() {
        let mut d = driver(vec![LevelRule::new(1, 1)], vec![near_dot()]);
        d.frame(0.0);
        d.push_input(InputEvent::Pointer { x: 0.0, y: 0.0 });
        let now = run_until(&mut d, 0.0, |d| d.awaiting_acknowledgment());

        d.push_input(InputEvent::Acknowledge);
        d.frame(now + FRAME_MS);
        assert_eq!(
            d.hud().notices.last(),
            Some(&Notice::GameComplete { total_score: 1 })
        );
        assert_eq!(d.controller().phase(), LevelPhase::Completed);

        d.push_input(InputEvent::Acknowledge);
        d.frame(now + 2.0 * FRAME_MS);
        assert_eq!(d.controller().phase(), LevelPhase::Idle);
        assert_eq!(d.controller().state().total_score, 0);
        assert_eq!(d.controller().state().level_index, 0);
    }

    #[test]
    fn test_frame_delta_clamped() {
        let mut d = driver(vec![LevelRule::new(1, 1)], Vec::new());
        d.frame(0.0);
        d.push_input(InputEvent::Pointer { x: 400.0, y: 300.0 });
        // A ten second stall advances the blast by max_frame_ms only
        d.frame(10_000.0);
        let blast = &d.controller().arena().explosions()[0];
        assert!(blast.radius() < 60.0);
        assert!(blast.radius() > 0.0);
    }

    #[test]
    fn test_resize_scales_next_level() {
        let mut d = driver(vec![LevelRule::new(1, 1)], Vec::new());
        d.push_input(InputEvent::Resize { viewport_width: 400.0 });
        d.frame(0.0);
        assert_eq!(d.controller().state().scale, 0.5);
        assert_eq!(d.controller().arena().bounds(), Vec2::new(800.0, 600.0));

        d.push_input(InputEvent::Resize { viewport_width: 0.0 });
        d.frame(FRAME_MS);
        assert_eq!(d.controller().state().scale, 0.5);
    }
}
