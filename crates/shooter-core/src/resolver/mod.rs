//! Resolvers for the last two stages of a tick.
//!
//! The tick runs four stages in a fixed order:
//!
//! 1. Input ([`crate::input::InputResolver`])
//! 2. Spawn ([`crate::spawner::Spawner`])
//! 3. Kinematics ([`KinematicsResolver`])
//! 4. Collision ([`CollisionResolver`])
//!
//! Each stage works directly on the [`Arena`](crate::arena::Arena) and sees
//! every change made by the stages before it. Stages iterate entities in id
//! order, so the outcome depends only on the seed, the config and the input.
//!
//! # Available Resolvers
//!
//! - [`KinematicsResolver`]: movement, adversary bounce, boundary removal
//! - [`CollisionResolver`]: projectile hits, player hits, reset

pub mod collision;
pub mod kinematics;

pub use collision::{reset_arena, CollisionOutcome, CollisionResolver};
pub use kinematics::{boundary_check, step_entity, Fate, KinematicsOutcome, KinematicsResolver};
