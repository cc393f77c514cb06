//! Per-tick event log.
//!
//! Events are telemetry: they never feed back into the simulation. Each call
//! to [`Simulation::step`](crate::simulation::Simulation::step) returns a
//! [`TickReport`] holding the events recorded during that tick, in the order
//! the stages produced them. Presentation layers use them for sound and
//! effects cues; tests use them to observe what happened.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// The player fired.
    ProjectileFired {
        /// New projectile.
        projectile: EntityId,
        /// Spawn anchor.
        position: Vec2,
        /// Initial velocity.
        velocity: Vec2,
    },
    /// The spawner placed an adversary.
    AdversarySpawned {
        /// New adversary.
        adversary: EntityId,
        /// Spawn anchor.
        position: Vec2,
    },
    /// The spawner gave up on one adversary of a batch.
    PlacementSkipped {
        /// Cells tried.
        attempts: u32,
    },
    /// A projectile destroyed an adversary.
    AdversaryDestroyed {
        /// Destroyed adversary.
        adversary: EntityId,
        /// Projectile that hit it.
        projectile: EntityId,
        /// Score after the reward.
        score: u64,
    },
    /// An adversary collided with the player.
    PlayerHit {
        /// Destroyed adversary.
        adversary: EntityId,
        /// Lives left after the hit.
        lives: u32,
    },
    /// A projectile left the top of the playfield.
    ProjectileExpired {
        /// Removed projectile.
        projectile: EntityId,
    },
    /// An adversary fell past the bottom of the playfield.
    AdversaryEscaped {
        /// Removed adversary.
        adversary: EntityId,
    },
    /// Lives ran out and the state was reset.
    SimulationReset {
        /// Score reached before the reset.
        final_score: u64,
        /// The replacement player.
        player: EntityId,
    },
}

/// Collects events while a tick runs.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Drains and returns all recorded events.
    pub fn take(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Index of the tick that ran (0 for the first).
    pub tick: u64,
    /// Simulated time at which the tick ran.
    pub clock_ms: u64,
    /// Events in stage order.
    pub events: Vec<SimEvent>,
    /// Input events that could not be decoded and were ignored.
    pub input_errors: u32,
    /// The input layer asked to stop.
    pub quit_requested: bool,
}

impl TickReport {
    /// Number of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&SimEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// Returns `true` if the tick ended in a reset.
    #[must_use]
    pub fn was_reset(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SimEvent::SimulationReset { .. }))
    }
}
