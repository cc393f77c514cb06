//! Presenter that reports frames through `tracing`.

use shooter_core::entity::EntityKind;
use shooter_core::runner::Presenter;
use shooter_core::{FrameSnapshot, Hud};

const SUMMARY_EVERY_TICKS: u64 = 600;

/// Logs HUD changes at `info` and a periodic frame summary at `debug`.
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_hud: Option<Hud>,
    frames: u64,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;

        if self.last_hud != Some(frame.hud) {
            tracing::info!(
                tick = frame.tick,
                lives = frame.hud.lives,
                score = frame.hud.score,
                kills = frame.hud.kills,
                "hud"
            );
            self.last_hud = Some(frame.hud);
        }

        if frame.tick % SUMMARY_EVERY_TICKS == 0 {
            tracing::debug!(
                tick = frame.tick,
                clock_ms = frame.clock_ms,
                adversaries = frame.count_of(EntityKind::Adversary),
                projectiles = frame.count_of(EntityKind::Projectile),
                "frame"
            );
        }
    }
}
