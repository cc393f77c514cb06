//! Test helper functions for setting up simulations and entities.

use glam::Vec2;

use crate::config::SimConfig;
use crate::entity::{AdversaryState, EntityId, EntityState, PlayerState};
use crate::event::{SimEvent, TickReport};
use crate::input::{KeyState, TickInput};
use crate::simulation::Simulation;

// =============================================================================
// Setup
// =============================================================================

/// A simulation with the default configuration.
pub fn new_sim(seed: u64) -> Simulation {
    Simulation::new(SimConfig::default(), seed).unwrap()
}

/// Places an adversary with the default sweep state at `position`.
pub fn spawn_adversary(sim: &mut Simulation, position: Vec2) -> EntityId {
    let size = sim.config().profiles.adversary.size;
    sim.arena_mut().spawn(
        position,
        size,
        EntityState::Adversary(AdversaryState::default()),
    )
}

/// Places an adversary exactly on the player.
pub fn spawn_on_player(sim: &mut Simulation) -> EntityId {
    let position = sim.player().unwrap().position;
    spawn_adversary(sim, position)
}

/// Steps with empty input until the clock reaches `clock_ms`.
pub fn idle_until(sim: &mut Simulation, clock_ms: u64) -> Vec<TickReport> {
    let mut reports = Vec::new();
    while sim.clock().now_ms() < clock_ms {
        reports.push(sim.step(&TickInput::default()));
    }
    reports
}

// =============================================================================
// Inspection
// =============================================================================

/// The player's state, cloned.
pub fn player_state(sim: &Simulation) -> PlayerState {
    sim.player_state().unwrap().clone()
}

/// Number of events matching `pred` across `reports`.
pub fn count_events(reports: &[TickReport], pred: impl Fn(&SimEvent) -> bool) -> usize {
    reports.iter().map(|r| r.count(&pred)).sum()
}

/// A repeatable input pattern: sweep right, sweep left, fire throughout.
pub fn patrol_input(tick: u64) -> TickInput {
    let phase = (tick / 90) % 2;
    let movement = if phase == 0 {
        KeyState::RIGHT
    } else {
        KeyState::LEFT
    };
    TickInput::held(movement | KeyState::FIRE)
}

/// Runs `ticks` ticks of [`patrol_input`], returning every report.
pub fn run_patrol(sim: &mut Simulation, ticks: u64) -> Vec<TickReport> {
    (0..ticks).map(|tick| sim.step(&patrol_input(tick))).collect()
}
