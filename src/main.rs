//! Chain Reaction headless runner
//!
//! Plays the game at a simulated 60 Hz: taps a live dot whenever the board is
//! idle and dismisses every popup. Useful for tuning a config file.
//!
//! Usage: `chain-reaction [config.json]` (viewport from `CHAIN_VIEWPORT_WIDTH`)

use std::process::ExitCode;

use chain_reaction::audio::LogAudio;
use chain_reaction::config::{Config, Profile, scale_for_viewport};
use chain_reaction::driver::{DriverConfig, FrameDriver, Hud, InputEvent, Notice, Renderer};
use chain_reaction::sim::{Dot, Explosion, HudSnapshot, LevelController, LevelPhase, RandomSource};
use rand::SeedableRng;
use rand_pcg::Pcg32;

const FRAME_MS: f64 = 1000.0 / 60.0;
/// One simulated hour
const MAX_FRAMES: u64 = 60 * 60 * 60;

/// Tracks the busiest frame instead of drawing
#[derive(Default)]
struct StatsRenderer {
    peak_explosions: usize,
}

impl Renderer for StatsRenderer {
    fn draw(&mut self, _dots: &[Dot], explosions: &[Explosion]) {
        self.peak_explosions = self.peak_explosions.max(explosions.len());
    }
}

/// Logs popups
#[derive(Default)]
struct LogHud {
    last: Option<HudSnapshot>,
    passes: u32,
    fails: u32,
    complete: bool,
}

impl Hud for LogHud {
    fn update(&mut self, snapshot: &HudSnapshot) {
        self.last = Some(*snapshot);
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::LevelPassed(r) => {
                self.passes += 1;
                log::info!(
                    "Level {} complete! Exploded {} dots (minimum {}). Total score: {}",
                    r.level_number(),
                    r.detonated,
                    r.goal,
                    r.total_score
                );
            }
            Notice::LevelFailed(r) => {
                self.fails += 1;
                log::info!(
                    "Try again! Exploded only {} dots (minimum {}). Score remains {}",
                    r.detonated,
                    r.goal,
                    r.total_score
                );
            }
            Notice::GameComplete { total_score } => {
                self.complete = true;
                log::info!("Congratulations! All levels complete. Final score {}", total_score);
            }
        }
    }
}

fn viewport_width() -> f32 {
    match std::env::var("CHAIN_VIEWPORT_WIDTH") {
        Ok(raw) => match raw.parse::<f32>() {
            Ok(w) if w > 0.0 => w,
            _ => {
                log::warn!("Invalid CHAIN_VIEWPORT_WIDTH '{}', using 800", raw);
                800.0
            }
        },
        Err(_) => 800.0,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let width = viewport_width();
    let config = match std::env::args().nth(1) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Cannot use config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let profile = Profile::for_viewport(width);
            log::info!("Using {} profile for {}px viewport", profile.as_str(), width);
            profile.config()
        }
    };

    let controller =
        match LevelController::with_scale(config, scale_for_viewport(width), Pcg32::from_os_rng()) {
            Ok(controller) => controller,
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                return ExitCode::FAILURE;
            }
        };

    let mut driver = FrameDriver::new(
        controller,
        StatsRenderer::default(),
        LogAudio::default(),
        LogHud::default(),
        DriverConfig::default(),
    );
    // Separate stream for choosing taps so it cannot disturb level layouts
    let mut picker = Pcg32::from_os_rng();

    let mut now = 0.0;
    while driver.frames() < MAX_FRAMES && !driver.hud().complete {
        if driver.awaiting_acknowledgment() {
            driver.push_input(InputEvent::Acknowledge);
        } else if driver.controller().phase() == LevelPhase::Idle {
            let dots = driver.controller().arena().dots();
            if !dots.is_empty() {
                let index = ((picker.next_unit() * dots.len() as f32) as usize).min(dots.len() - 1);
                let target = dots[index].pos;
                driver.push_input(InputEvent::Pointer {
                    x: target.x,
                    y: target.y,
                });
            }
        }
        driver.frame(now);
        now += FRAME_MS;
    }

    let hud = driver.hud();
    let score = hud.last.map(|h| h.score).unwrap_or(0);
    println!(
        "{} after {:.1}s simulated: {} passes, {} fails, score {}, peak {} explosions, {} sounds",
        if hud.complete { "Completed" } else { "Stopped" },
        now / 1000.0,
        hud.passes,
        hud.fails,
        score,
        driver.renderer().peak_explosions,
        driver.audio().played
    );
    ExitCode::SUCCESS
}
