//! Entity types for the shooter simulation.
//!
//! - [`EntityId`]: Unique identifier for entities
//! - [`EntityKind`]: Classification used by the stages to pick behaviour
//! - [`EntityState`]: Kind-specific state (player counters, sweep sign, owner)
//! - [`Entity`]: The complete entity: kinematics plus kind-specific state
//!
//! There is no per-kind trait object. Stages match on [`EntityState`] and the
//! kind is always derived from the state, so the two cannot disagree.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use shooter_core::entity::{Entity, EntityId, EntityKind, EntityState, PlayerState};
//!
//! let player = Entity::new(
//!     EntityId::new(0),
//!     Vec2::new(459.0, 544.35),
//!     Vec2::splat(64.0),
//!     EntityState::Player(PlayerState::new(3)),
//! );
//!
//! assert_eq!(player.kind(), EntityKind::Player);
//! assert!(player.as_player().is_some());
//! ```

pub mod components;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bounds::Aabb;

pub use components::{AdversaryState, PlayerState, ProjectileState, Side};

/// Unique identifier for an entity.
///
/// Ids are assigned monotonically by the [`Arena`](crate::arena::Arena) and
/// never reused, so ordering by id is ordering by creation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Entity classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player's ship. Exactly one exists at any time.
    Player,
    /// Enemy sweeping across and down the playfield.
    Adversary,
    /// Player-fired shot travelling upward.
    Projectile,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Adversary => write!(f, "Adversary"),
            Self::Projectile => write!(f, "Projectile"),
        }
    }
}

/// Kind-specific state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityState {
    /// Player counters and fire cooldown.
    Player(PlayerState),
    /// Sweep direction and bounce latch.
    Adversary(AdversaryState),
    /// Projectile ownership.
    Projectile(ProjectileState),
}

impl EntityState {
    /// Returns the [`EntityKind`] matching this state.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Player(_) => EntityKind::Player,
            Self::Adversary(_) => EntityKind::Adversary,
            Self::Projectile(_) => EntityKind::Projectile,
        }
    }
}

/// A simulated object.
///
/// `position` is the mid-bottom anchor of the sprite and `velocity` is in
/// playfield units per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    /// Mid-bottom anchor.
    pub position: Vec2,
    /// Displacement applied once per tick.
    pub velocity: Vec2,
    size: Vec2,
    state: EntityState,
}

impl Entity {
    /// Creates a new entity. The kind is taken from `state`.
    #[must_use]
    pub const fn new(id: EntityId, position: Vec2, size: Vec2, state: EntityState) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            size,
            state,
        }
    }

    /// Builder-style velocity setter.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns the entity's unique identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.state.kind()
    }

    /// Sprite size used for the bounding box.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Current bounding box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_anchor(self.position, self.size)
    }

    /// Kind-specific state.
    #[must_use]
    pub const fn state(&self) -> &EntityState {
        &self.state
    }

    /// Mutable kind-specific state.
    #[must_use]
    pub fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    /// Returns `true` if this entity is the player.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.state, EntityState::Player(_))
    }

    /// Returns `true` if this entity is an adversary.
    #[must_use]
    pub const fn is_adversary(&self) -> bool {
        matches!(self.state, EntityState::Adversary(_))
    }

    /// Returns `true` if this entity is a projectile.
    #[must_use]
    pub const fn is_projectile(&self) -> bool {
        matches!(self.state, EntityState::Projectile(_))
    }

    /// Player state, if this is the player.
    #[must_use]
    pub const fn as_player(&self) -> Option<&PlayerState> {
        match &self.state {
            EntityState::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Mutable player state, if this is the player.
    #[must_use]
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.state {
            EntityState::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Adversary state, if this is an adversary.
    #[must_use]
    pub const fn as_adversary(&self) -> Option<&AdversaryState> {
        match &self.state {
            EntityState::Adversary(adversary) => Some(adversary),
            _ => None,
        }
    }

    /// Mutable adversary state, if this is an adversary.
    #[must_use]
    pub fn as_adversary_mut(&mut self) -> Option<&mut AdversaryState> {
        match &mut self.state {
            EntityState::Adversary(adversary) => Some(adversary),
            _ => None,
        }
    }

    /// Projectile state, if this is a projectile.
    #[must_use]
    pub const fn as_projectile(&self) -> Option<&ProjectileState> {
        match &self.state {
            EntityState::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }
}
