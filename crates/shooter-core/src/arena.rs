//! Arena: the container for every live entity.
//!
//! The Arena provides:
//! - Entity storage with deterministic iteration order (`BTreeMap`)
//! - Entity lifecycle management (spawn/despawn)
//! - The player's singleton reference
//!
//! Entity ids are monotonically increasing and never reused, so iterating the
//! `BTreeMap` visits entities in creation order on every platform.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use shooter_core::arena::Arena;
//! use shooter_core::entity::{AdversaryState, EntityState, PlayerState};
//!
//! let mut arena = Arena::new();
//! let player = arena.spawn_player(Vec2::new(459.0, 544.35), Vec2::splat(64.0), PlayerState::new(3));
//! let enemy = arena.spawn(
//!     Vec2::new(96.0, 57.3),
//!     Vec2::splat(64.0),
//!     EntityState::Adversary(AdversaryState::default()),
//! );
//!
//! let ids: Vec<_> = arena.entity_ids_sorted().collect();
//! assert_eq!(ids, vec![player, enemy]);
//! assert_eq!(arena.player_id(), Some(player));
//! ```

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, EntityState, PlayerState};

/// Container for all simulation entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    /// Monotonically increasing entity ID counter.
    next_id: u64,
    /// Entity storage with deterministic iteration order.
    entities: BTreeMap<EntityId, Entity>,
    /// The current player entity.
    player: Option<EntityId>,
}

impl Arena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a new entity and returns its id.
    ///
    /// Spawning a player through this method does not make it the tracked
    /// player; use [`Arena::spawn_player`] for that.
    pub fn spawn(&mut self, position: Vec2, size: Vec2, state: EntityState) -> EntityId {
        self.insert_with(|id| Entity::new(id, position, size, state))
    }

    /// Spawns an entity with an initial velocity.
    pub fn spawn_moving(
        &mut self,
        position: Vec2,
        size: Vec2,
        velocity: Vec2,
        state: EntityState,
    ) -> EntityId {
        self.insert_with(|id| Entity::new(id, position, size, state).with_velocity(velocity))
    }

    /// Spawns the player, replacing (despawning) any previous player.
    pub fn spawn_player(&mut self, position: Vec2, size: Vec2, state: PlayerState) -> EntityId {
        if let Some(old) = self.player.take() {
            self.entities.remove(&old);
        }
        let id = self.spawn(position, size, EntityState::Player(state));
        self.player = Some(id);
        id
    }

    fn insert_with(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, build(id));
        id
    }

    /// Despawns an entity, returning it if it existed.
    ///
    /// The tracked player cannot be despawned; use [`Arena::spawn_player`] to
    /// replace it.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        if self.player == Some(id) {
            return None;
        }
        self.entities.remove(&id)
    }

    /// Removes every entity except the tracked player. Returns how many were
    /// removed.
    pub fn clear_non_player(&mut self) -> usize {
        let before = self.entities.len();
        let player = self.player;
        self.entities.retain(|id, _| Some(*id) == player);
        before - self.entities.len()
    }

    /// Returns a reference to an entity by ID.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns a mutable reference to an entity by ID.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns `true` if the entity is live.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// The tracked player's id.
    #[must_use]
    pub const fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    /// The tracked player entity.
    #[must_use]
    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.entities.get(&id))
    }

    /// Mutable access to the tracked player entity.
    #[must_use]
    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.player.and_then(|id| self.entities.get_mut(&id))
    }

    /// Returns an iterator over entity IDs in deterministic (sorted) order.
    pub fn entity_ids_sorted(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Returns an iterator over entities in deterministic (sorted by ID) order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Returns an iterator over mutable entities in deterministic order.
    pub fn entities_sorted_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.values_mut()
    }

    /// Ids of all entities of `kind`, sorted.
    #[must_use]
    pub fn ids_of(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.kind() == kind)
            .map(Entity::id)
            .collect()
    }

    /// Number of live entities of `kind`.
    #[must_use]
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind() == kind).count()
    }

    /// Returns the number of entities in the arena.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the arena has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
