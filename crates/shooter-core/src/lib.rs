//! # Shooter Core
//!
//! Deterministic simulation core for a single-screen 2D arcade shooter.
//!
//! The player ship moves along the bottom of the playfield and fires
//! projectiles upward; adversaries appear in timed batches near the top,
//! sweep sideways, drop a row each time they reach a side margin and are
//! destroyed by projectiles for score. Colliding with an adversary costs a
//! life, and losing the last one resets the round.
//!
//! ## Architecture
//!
//! One [`Simulation::step`] runs four stages in a fixed order:
//!
//! - **Input**: key events or snapshots become movement and fire intents
//! - **Spawn**: timed adversary batches on a non-overlapping grid
//! - **Kinematics**: sweeping, bouncing, integration, boundary removal
//! - **Collision**: projectile hits, player hits, reset
//!
//! Rendering, audio and the window live outside this crate. A presentation
//! layer reads [`FrameSnapshot`]s; the [`runner`] module ties a simulation to
//! an input source, a presenter and a pacer.
//!
//! ## Usage
//!
//! ```
//! use shooter_core::{KeyState, SimConfig, Simulation, TickInput};
//!
//! let mut sim = Simulation::new(SimConfig::default(), 7).unwrap();
//! let report = sim.step(&TickInput::held(KeyState::FIRE));
//! assert_eq!(report.events.len(), 1);
//! assert_eq!(sim.snapshot().entities.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod bounds;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod input;
pub mod resolver;
pub mod runner;
pub mod simulation;
pub mod snapshot;
pub mod spawner;

pub use arena::Arena;
pub use bounds::Aabb;
pub use config::{InputMode, IntervalPolicy, SimConfig};
pub use entity::{Entity, EntityId, EntityKind};
pub use error::{SimError, SimResult};
pub use event::{SimEvent, TickReport};
pub use input::{Key, KeyState, RawKeyEvent, TickInput};
pub use runner::{run_loop, RunSummary};
pub use simulation::Simulation;
pub use snapshot::{DrawItem, FrameSnapshot, Hud};

#[cfg(test)]
mod tests;
