//! Simulation module with the four-stage tick.
//!
//! The `Simulation` struct owns all mutable state and runs one tick per call
//! to [`Simulation::step`]:
//!
//! 1. **INPUT**: decode input, set the player's velocity, maybe fire
//! 2. **SPAWN**: place an adversary batch once the deadline has passed
//! 3. **KINEMATICS**: bounce, integrate, remove what left the playfield
//! 4. **COLLISION**: projectile hits, player hits, reset on last life
//!
//! All stages see the clock value at the start of the tick. The clock
//! advances after the collision stage.
//!
//! # Determinism
//!
//! Given the same config, seed and input sequence, two simulations produce
//! identical states and reports:
//! - Entities are iterated in ID order (via `BTreeMap`)
//! - The only randomness is the spawner's `ChaCha8Rng`, seeded from `seed`
//! - Time comes from the simulated clock, never the wall clock
//!
//! # Example
//!
//! ```
//! use shooter_core::config::SimConfig;
//! use shooter_core::input::{KeyState, TickInput};
//! use shooter_core::simulation::Simulation;
//!
//! let mut sim = Simulation::new(SimConfig::default(), 42).unwrap();
//!
//! for _ in 0..10 {
//!     sim.step(&TickInput::held(KeyState::RIGHT));
//! }
//!
//! assert_eq!(sim.clock().tick(), 10);
//! assert_eq!(sim.arena().count_of(shooter_core::entity::EntityKind::Player), 1);
//! ```

use crate::arena::Arena;
use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::entity::{Entity, PlayerState};
use crate::error::SimResult;
use crate::event::{EventLog, TickReport};
use crate::input::{InputResolver, TickInput};
use crate::resolver::{reset_arena, CollisionResolver, KinematicsResolver};
use crate::snapshot::FrameSnapshot;
use crate::spawner::Spawner;

// =============================================================================
// Simulation
// =============================================================================

/// The simulation orchestrator.
///
/// `Simulation` manages:
/// - The arena of live entities
/// - The simulated clock
/// - The state of each stage (input latch, spawn schedule)
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    seed: u64,
    arena: Arena,
    clock: SimClock,
    input: InputResolver,
    spawner: Spawner,
    kinematics: KinematicsResolver,
    collision: CollisionResolver,
}

impl Simulation {
    /// Creates a simulation at time 0 with the player at its start position.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`](crate::error::SimError::InvalidConfig)
    /// if `config` fails validation.
    ///
    /// # Example
    ///
    /// ```
    /// use shooter_core::config::SimConfig;
    /// use shooter_core::simulation::Simulation;
    ///
    /// let sim = Simulation::new(SimConfig::default(), 12345).unwrap();
    /// assert_eq!(sim.clock().now_ms(), 0);
    /// assert_eq!(sim.seed(), 12345);
    /// ```
    pub fn new(config: SimConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;

        let mut arena = Arena::new();
        let player = arena.spawn_player(
            config.player_start(),
            config.profiles.player.size,
            PlayerState::new(config.initial_lives),
        );
        tracing::debug!(%player, seed, "simulation created");

        Ok(Self {
            input: InputResolver::new(config.input_mode),
            spawner: Spawner::new(&config, seed),
            kinematics: KinematicsResolver::new(),
            collision: CollisionResolver::new(),
            arena,
            clock: SimClock::new(),
            config,
            seed,
        })
    }

    /// Runs one tick with the fixed `tick_ms` delta.
    pub fn step(&mut self, input: &TickInput) -> TickReport {
        self.step_with_delta(input, self.config.tick_ms)
    }

    /// Runs one tick, then advances the clock by `delta_ms`.
    pub fn step_with_delta(&mut self, input: &TickInput, delta_ms: u64) -> TickReport {
        let tick = self.clock.tick();
        let now = self.clock.now_ms();
        let mut log = EventLog::new();

        let input_outcome = self
            .input
            .resolve(input, &mut self.arena, now, &self.config, &mut log);
        self.spawner
            .update(&mut self.arena, now, &self.config, &mut log);
        self.kinematics
            .resolve(&mut self.arena, &self.config, &mut log);
        self.collision
            .resolve(&mut self.arena, &self.config, &mut log);

        self.clock.advance(delta_ms);

        let report = TickReport {
            tick,
            clock_ms: now,
            events: log.take(),
            input_errors: input_outcome.decode_errors,
            quit_requested: input_outcome.intents.quit,
        };
        tracing::trace!(
            tick,
            clock_ms = now,
            entities = self.arena.entity_count(),
            events = report.events.len(),
            "tick complete"
        );
        report
    }

    /// Replaces the player and clears all other entities, exactly as when
    /// the last life is lost. The clock and spawn schedule are kept.
    pub fn reset(&mut self) -> TickReport {
        let mut log = EventLog::new();
        reset_arena(&mut self.arena, &self.config, &mut log);
        TickReport {
            tick: self.clock.tick(),
            clock_ms: self.clock.now_ms(),
            events: log.take(),
            ..TickReport::default()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Live entities.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access to the arena, for scenario setup.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// The simulated clock.
    #[must_use]
    pub const fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// The player entity.
    #[must_use]
    pub fn player(&self) -> Option<&Entity> {
        self.arena.player()
    }

    /// The player's lives, score and cooldown.
    #[must_use]
    pub fn player_state(&self) -> Option<&PlayerState> {
        self.arena.player().and_then(Entity::as_player)
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The seed the spawner was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The spawn stage, for inspecting its schedule.
    #[must_use]
    pub const fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Read-only view for a presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputMode;
    use crate::entity::EntityKind;
    use crate::error::SimError;
    use crate::event::SimEvent;
    use crate::input::{Key, KeyState, RawKeyEvent};

    mod construction_tests {
        use super::*;

        #[test]
        fn new_spawns_single_player() {
            let sim = Simulation::new(SimConfig::default(), 1).unwrap();
            assert_eq!(sim.arena().entity_count(), 1);
            let player = sim.player().unwrap();
            assert_eq!(player.position.x, 459.0);
            assert!((player.position.y - 544.35).abs() < 1e-3);
            assert_eq!(sim.player_state().unwrap().lives, 3);
        }

        #[test]
        fn new_rejects_invalid_config() {
            let config = SimConfig {
                batch_size: 0,
                ..SimConfig::default()
            };
            let err = Simulation::new(config, 1).unwrap_err();
            assert!(matches!(err, SimError::InvalidConfig { field: "batch_size", .. }));
        }
    }

    mod step_tests {
        use super::*;

        #[test]
        fn clock_advances_after_stages() {
            let mut sim = Simulation::new(SimConfig::default(), 1).unwrap();
            let first = sim.step(&TickInput::default());
            let second = sim.step(&TickInput::default());
            assert_eq!((first.tick, first.clock_ms), (0, 0));
            assert_eq!((second.tick, second.clock_ms), (1, 16));
            assert_eq!(sim.clock().now_ms(), 32);
        }

        #[test]
        fn measured_delta_is_used() {
            let mut sim = Simulation::new(SimConfig::default(), 1).unwrap();
            sim.step_with_delta(&TickInput::default(), 40);
            assert_eq!(sim.clock().now_ms(), 40);
        }

        #[test]
        fn first_fire_then_cooldown() {
            let mut sim = Simulation::new(SimConfig::default(), 1).unwrap();
            let fire = TickInput::held(KeyState::FIRE);

            let report = sim.step(&fire);
            assert_eq!(
                report.count(|e| matches!(e, SimEvent::ProjectileFired { .. })),
                1
            );
            assert_eq!(sim.player_state().unwrap().next_fire_ms, 150);

            // 16 ms ticks: refused until the clock reaches 150.
            let mut fired_at = None;
            for _ in 0..20 {
                let report = sim.step(&fire);
                if report.count(|e| matches!(e, SimEvent::ProjectileFired { .. })) > 0 {
                    fired_at = Some(report.clock_ms);
                    break;
                }
            }
            assert_eq!(fired_at, Some(160));
            assert_eq!(sim.player_state().unwrap().next_fire_ms, 300);
        }

        #[test]
        fn movement_applies_in_same_tick() {
            let mut sim = Simulation::new(SimConfig::default(), 1).unwrap();
            sim.step(&TickInput::held(KeyState::LEFT));
            assert_eq!(sim.player().unwrap().position.x, 454.0);
            sim.step(&TickInput::default());
            assert_eq!(sim.player().unwrap().position.x, 454.0);
        }

        #[test]
        fn first_batch_after_clock_passes_zero() {
            let mut sim = Simulation::new(SimConfig::default(), 5).unwrap();
            let first = sim.step(&TickInput::default());
            assert_eq!(
                first.count(|e| matches!(e, SimEvent::AdversarySpawned { .. })),
                0
            );
            let second = sim.step(&TickInput::default());
            assert_eq!(
                second.count(|e| matches!(e, SimEvent::AdversarySpawned { .. })),
                1
            );
            assert!(sim.spawner().deadline_ms() >= 1000);
        }

        #[test]
        fn quit_is_reported_and_tick_completes() {
            let mut sim = Simulation::new(SimConfig::default(), 1).unwrap();
            let report = sim.step(&TickInput::quit());
            assert!(report.quit_requested);
            assert_eq!(sim.clock().tick(), 1);
        }

        #[test]
        fn bad_codes_are_counted() {
            let config = SimConfig {
                input_mode: InputMode::Edge,
                ..SimConfig::default()
            };
            let mut sim = Simulation::new(config, 1).unwrap();
            let input = TickInput::events(vec![
                RawKeyEvent { code: 0x41, pressed: true },
                RawKeyEvent::press(Key::Right),
            ]);
            let report = sim.step(&input);
            assert_eq!(report.input_errors, 1);
            assert_eq!(sim.player().unwrap().position.x, 464.0);
        }
    }

    mod reset_tests {
        use super::*;

        #[test]
        fn manual_reset_replaces_player() {
            let mut sim = Simulation::new(SimConfig::default(), 1).unwrap();
            let old = sim.arena().player_id().unwrap();
            for _ in 0..200 {
                sim.step(&TickInput::held(KeyState::FIRE | KeyState::LEFT));
            }
            let clock = sim.clock().now_ms();
            let deadline = sim.spawner().deadline_ms();

            let report = sim.reset();

            assert!(report.was_reset());
            let new = sim.arena().player_id().unwrap();
            assert_ne!(old, new);
            assert_eq!(sim.arena().entity_count(), 1);
            assert_eq!(sim.arena().count_of(EntityKind::Player), 1);
            assert_eq!(sim.player().unwrap().position, sim.config().player_start());
            assert_eq!(sim.clock().now_ms(), clock);
            assert_eq!(sim.spawner().deadline_ms(), deadline);
        }
    }
}
