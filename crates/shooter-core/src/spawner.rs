//! Adversary spawner.
//!
//! The spawner keeps a deadline on the simulated clock. Once the clock passes
//! it, a batch of adversaries is placed on a grid of adversary-sized cells
//! near the top of the playfield and the deadline moves forward by the
//! current interval. At most one batch runs per tick, so a clock that jumps
//! far ahead catches up over several ticks.
//!
//! # Placement
//!
//! Each adversary picks a random cell and retries while its bounding box
//! overlaps a live adversary, including ones placed earlier in the same
//! batch. After `max_placement_attempts` misses the adversary is skipped
//! and a warning is logged.
//!
//! # Determinism
//!
//! All randomness comes from a `ChaCha8Rng` seeded from the simulation seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::arena::Arena;
use crate::bounds::Aabb;
use crate::config::{IntervalPolicy, SimConfig};
use crate::entity::{AdversaryState, EntityId, EntityKind, EntityState};
use crate::error::SimError;
use crate::event::{EventLog, SimEvent};

/// Result of one [`Spawner::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOutcome {
    /// Adversaries placed this tick, in placement order.
    pub placed: Vec<EntityId>,
    /// Adversaries given up on this tick.
    pub skipped: u32,
}

impl SpawnOutcome {
    /// Returns `true` if a batch ran this tick.
    #[must_use]
    pub fn ran(&self) -> bool {
        !self.placed.is_empty() || self.skipped > 0
    }
}

/// Second stage of the tick.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: ChaCha8Rng,
    deadline_ms: u64,
    interval_ms: u64,
    columns: Vec<f32>,
}

impl Spawner {
    /// Creates a spawner with its deadline at 0 and a freshly drawn interval.
    #[must_use]
    pub fn new(config: &SimConfig, seed: u64) -> Self {
        let mut spawner = Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            deadline_ms: 0,
            interval_ms: 0,
            columns: config.spawn_columns(),
        };
        spawner.interval_ms = spawner.roll_interval(config);
        spawner
    }

    /// Clock value the next batch waits for.
    #[must_use]
    pub const fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    /// Current spawn interval.
    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Anchor x of every grid cell.
    #[must_use]
    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    fn roll_interval(&mut self, config: &SimConfig) -> u64 {
        self.rng
            .gen_range(config.spawn_interval_min_ms..=config.spawn_interval_max_ms)
    }

    /// Runs the spawn stage for a tick at `clock_ms`.
    pub fn update(
        &mut self,
        arena: &mut Arena,
        clock_ms: u64,
        config: &SimConfig,
        log: &mut EventLog,
    ) -> SpawnOutcome {
        if config.interval_policy == IntervalPolicy::RerollEveryTick {
            self.interval_ms = self.roll_interval(config);
        }

        if clock_ms <= self.deadline_ms {
            return SpawnOutcome::default();
        }

        let outcome = self.place_batch(arena, config, log);
        self.deadline_ms = self.deadline_ms.saturating_add(self.interval_ms);
        tracing::trace!(
            clock_ms,
            placed = outcome.placed.len(),
            skipped = outcome.skipped,
            next_deadline = self.deadline_ms,
            "spawn batch"
        );
        outcome
    }

    /// Places `config.batch_size` adversaries, skipping any that find no
    /// free cell.
    pub fn place_batch(
        &mut self,
        arena: &mut Arena,
        config: &SimConfig,
        log: &mut EventLog,
    ) -> SpawnOutcome {
        let profile = &config.profiles.adversary;
        let mut occupied: Vec<Aabb> = arena
            .entities_sorted()
            .filter(|e| e.kind() == EntityKind::Adversary)
            .map(crate::entity::Entity::bounds)
            .collect();

        let mut outcome = SpawnOutcome::default();
        for _ in 0..config.batch_size {
            match self.find_cell(&occupied, config) {
                Ok(position) => {
                    let state = AdversaryState::default();
                    let velocity = Vec2::new(state.heading() * profile.base_speed, 0.0);
                    let adversary = arena.spawn_moving(
                        position,
                        profile.size,
                        velocity,
                        EntityState::Adversary(state),
                    );
                    occupied.push(Aabb::from_anchor(position, profile.size));
                    tracing::debug!(%adversary, x = position.x, y = position.y, "adversary spawned");
                    log.push(SimEvent::AdversarySpawned {
                        adversary,
                        position,
                    });
                    outcome.placed.push(adversary);
                }
                Err(err) => {
                    tracing::warn!(%err, "skipping adversary placement");
                    let attempts = match err {
                        SimError::InvalidPlacement { attempts } => attempts,
                        _ => config.max_placement_attempts,
                    };
                    log.push(SimEvent::PlacementSkipped { attempts });
                    outcome.skipped += 1;
                }
            }
        }
        outcome
    }

    /// Picks random cells until one does not overlap `occupied`.
    fn find_cell(&mut self, occupied: &[Aabb], config: &SimConfig) -> Result<Vec2, SimError> {
        let size = config.profiles.adversary.size;
        let y = config.spawn_y();
        if self.columns.is_empty() {
            return Err(SimError::InvalidPlacement { attempts: 0 });
        }
        for _ in 0..config.max_placement_attempts {
            let column = self.columns[self.rng.gen_range(0..self.columns.len())];
            let candidate = Vec2::new(column, y);
            let bounds = Aabb::from_anchor(candidate, size);
            if !occupied.iter().any(|other| other.overlaps(&bounds)) {
                return Ok(candidate);
            }
        }
        Err(SimError::InvalidPlacement {
            attempts: config.max_placement_attempts,
        })
    }
}
