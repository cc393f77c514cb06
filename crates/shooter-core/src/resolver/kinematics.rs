//! Kinematics resolver: movement, adversary bounce and boundary removal.
//!
//! Every entity goes through [`step_entity`], which switches on the entity's
//! kind:
//!
//! - **Adversary**: boundary check first, then `position += velocity`, then
//!   the escape check against the bottom edge.
//! - **Projectile**: `position += velocity`, removed once `position.y < 0`.
//! - **Player**: `position += velocity`, optionally clamped to the playfield.
//!
//! # Bounce rule
//!
//! An adversary is "in" a margin when its bounding box crosses
//! `margin * width` on the left or `(1 - margin) * width` on the right.
//! Entering a margin toggles the sweep sign once and moves the adversary down
//! by `drop_step` on that tick. The side is latched until the adversary
//! leaves the margin, so an adversary that stays inside for several ticks
//! does not flip back.

use glam::Vec2;

use crate::arena::Arena;
use crate::config::SimConfig;
use crate::entity::{Entity, EntityId, EntityState, Side};
use crate::event::{EventLog, SimEvent};

/// What happens to an entity after its kinematics step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fate {
    /// Stays in the arena.
    Keep,
    /// Projectile left the top edge.
    Expired,
    /// Adversary fell past the bottom edge.
    Escaped,
}

/// Result of [`KinematicsResolver::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KinematicsOutcome {
    /// Projectiles removed at the top edge.
    pub expired: Vec<EntityId>,
    /// Adversaries removed at the bottom edge.
    pub escaped: Vec<EntityId>,
    /// Adversaries that bounced this tick.
    pub bounced: Vec<EntityId>,
}

/// Third stage of the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinematicsResolver;

impl KinematicsResolver {
    /// Creates a kinematics resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Steps every entity once and removes the ones that left the playfield.
    pub fn resolve(&self, arena: &mut Arena, config: &SimConfig, log: &mut EventLog) -> KinematicsOutcome {
        let mut outcome = KinematicsOutcome::default();

        for entity in arena.entities_sorted_mut() {
            if entity.is_adversary() && boundary_check(entity, config) {
                outcome.bounced.push(entity.id());
            }
            match step_entity(entity, config) {
                Fate::Keep => {}
                Fate::Expired => outcome.expired.push(entity.id()),
                Fate::Escaped => outcome.escaped.push(entity.id()),
            }
        }

        for &projectile in &outcome.expired {
            arena.despawn(projectile);
            log.push(SimEvent::ProjectileExpired { projectile });
        }
        for &adversary in &outcome.escaped {
            arena.despawn(adversary);
            tracing::debug!(%adversary, "adversary escaped");
            log.push(SimEvent::AdversaryEscaped { adversary });
        }
        outcome
    }
}

/// Applies the adversary bounce rule and sets the adversary's velocity for
/// this tick. Returns `true` if the direction was toggled.
///
/// Does nothing for other kinds.
pub fn boundary_check(entity: &mut Entity, config: &SimConfig) -> bool {
    let bounds = entity.bounds();
    let side = if bounds.min.x < config.left_margin_x() {
        Some(Side::Left)
    } else if bounds.max.x > config.right_margin_x() {
        Some(Side::Right)
    } else {
        None
    };
    let speed = config.profiles.adversary.base_speed;

    let Some(state) = entity.as_adversary_mut() else {
        return false;
    };

    let mut toggled = false;
    match side {
        Some(side) if state.bounce_latch != Some(side) => {
            state.direction = -state.direction;
            state.bounce_latch = Some(side);
            toggled = true;
        }
        Some(_) => {}
        None => state.bounce_latch = None,
    }

    let drop = if toggled { config.drop_step } else { 0.0 };
    entity.velocity = Vec2::new(state.heading() * speed, drop);
    toggled
}

/// Integrates one entity and reports whether it should be removed.
pub fn step_entity(entity: &mut Entity, config: &SimConfig) -> Fate {
    entity.position += entity.velocity;

    match entity.state() {
        EntityState::Projectile(_) => {
            if entity.position.y < 0.0 {
                Fate::Expired
            } else {
                Fate::Keep
            }
        }
        EntityState::Adversary(_) => {
            if config.despawn_escaped_adversaries && entity.bounds().min.y > config.height {
                Fate::Escaped
            } else {
                Fate::Keep
            }
        }
        EntityState::Player(_) => {
            if config.clamp_player {
                // A player wider than the playfield pins to `width - half`.
                let half = entity.size().x * 0.5;
                entity.position.x = entity.position.x.max(half).min(config.width - half);
            }
            Fate::Keep
        }
    }
}
