//! Tick loop and its collaborators.
//!
//! [`run_loop`] drives a [`Simulation`] with three collaborators:
//!
//! - an [`InputSource`] polled once per tick,
//! - a [`Presenter`] handed a [`FrameSnapshot`] after each step,
//! - a [`Pacer`] that blocks until the next tick is due.
//!
//! Quit is checked once per tick, after the step and the present. A tick is
//! never aborted halfway.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::event::SimEvent;
use crate::input::TickInput;
use crate::simulation::Simulation;
use crate::snapshot::{FrameSnapshot, Hud};

// =============================================================================
// Collaborators
// =============================================================================

/// Supplies the input for each tick.
pub trait InputSource {
    /// Input for the tick about to run at `clock_ms`.
    fn poll(&mut self, clock_ms: u64) -> TickInput;
}

/// Receives a frame after each tick.
pub trait Presenter {
    /// Draw or record `frame`.
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Controls tick cadence.
pub trait Pacer {
    /// Blocks until the next tick is due.
    fn wait(&mut self);
}

/// Caps the loop at a fixed rate using the wall clock.
///
/// If a tick overruns, the next one starts immediately and the schedule
/// restarts from there instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct TickLimiter {
    period: Duration,
    next: Option<Instant>,
}

impl TickLimiter {
    /// A limiter for `rate_hz` ticks per second. A rate of 0 is treated as 1.
    #[must_use]
    pub fn new(rate_hz: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / rate_hz.max(1),
            next: None,
        }
    }

    /// Target duration of one tick.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}

impl Pacer for TickLimiter {
    fn wait(&mut self) {
        let now = Instant::now();
        if let Some(deadline) = self.next {
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }
        let base = self.next.map_or(now, |deadline| deadline.max(now));
        self.next = Some(base + self.period);
    }
}

/// Runs ticks back to back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

impl Pacer for Unpaced {
    fn wait(&mut self) {}
}

/// Replays a fixed sequence of inputs, then empty input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
}

impl ScriptedInput {
    /// Replays `script` in order.
    pub fn new(script: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Inputs not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _clock_ms: u64) -> TickInput {
        self.script.pop_front().unwrap_or_default()
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: &FrameSnapshot) {}
}

// =============================================================================
// Loop
// =============================================================================

/// Totals for one [`run_loop`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ticks run.
    pub ticks: u64,
    /// Simulated time at the end.
    pub clock_ms: u64,
    /// HUD after the last tick.
    pub final_hud: Hud,
    /// Resets that happened during the run.
    pub resets: u32,
    /// Adversaries destroyed by projectiles, across resets.
    pub kills: u64,
    /// The loop stopped because input asked to quit.
    pub quit_requested: bool,
}

/// Runs `sim` until input asks to quit or `max_ticks` ticks have run.
pub fn run_loop(
    sim: &mut Simulation,
    input: &mut impl InputSource,
    presenter: &mut impl Presenter,
    pacer: &mut impl Pacer,
    max_ticks: u64,
) -> RunSummary {
    let mut summary = RunSummary::default();

    while summary.ticks < max_ticks {
        let tick_input = input.poll(sim.clock().now_ms());
        let report = sim.step(&tick_input);
        summary.ticks += 1;

        for event in &report.events {
            match event {
                SimEvent::AdversaryDestroyed { .. } => summary.kills += 1,
                SimEvent::SimulationReset { final_score, .. } => {
                    summary.resets += 1;
                    tracing::info!(tick = report.tick, final_score, "game over");
                }
                _ => {}
            }
        }

        presenter.present(&sim.snapshot());

        if report.quit_requested {
            tracing::info!(tick = report.tick, "quit requested");
            summary.quit_requested = true;
            break;
        }
        pacer.wait();
    }

    summary.clock_ms = sim.clock().now_ms();
    summary.final_hud = sim.snapshot().hud;
    tracing::debug!(
        ticks = summary.ticks,
        resets = summary.resets,
        kills = summary.kills,
        "run finished"
    );
    summary
}
