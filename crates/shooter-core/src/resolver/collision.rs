//! Collision resolver: projectile hits, player hits and the reset rule.
//!
//! Projectiles are checked in id order against the adversaries still alive,
//! also in id order. The first overlap destroys both, so one projectile
//! kills at most one adversary and a destroyed adversary cannot be hit
//! twice. The player is then checked against every remaining adversary;
//! each overlap destroys the adversary and costs one life.
//!
//! When the player has no lives left the arena is reset in place (see
//! [`reset_arena`]). The clock and the spawn schedule are untouched.

use crate::arena::Arena;
use crate::config::SimConfig;
use crate::entity::{EntityId, EntityKind, PlayerState};
use crate::event::{EventLog, SimEvent};

/// Result of [`CollisionResolver::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// `(projectile, adversary)` pairs destroyed this tick.
    pub kills: Vec<(EntityId, EntityId)>,
    /// Adversaries that hit the player.
    pub player_hits: Vec<EntityId>,
    /// Replacement player if the tick ended in a reset.
    pub reset: Option<EntityId>,
}

/// Fourth stage of the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Creates a collision resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves all overlaps for this tick.
    pub fn resolve(&self, arena: &mut Arena, config: &SimConfig, log: &mut EventLog) -> CollisionOutcome {
        let mut outcome = CollisionOutcome::default();
        let mut adversaries = arena.ids_of(EntityKind::Adversary);

        for projectile in arena.ids_of(EntityKind::Projectile) {
            let Some(shot) = arena.get(projectile).map(crate::entity::Entity::bounds) else {
                continue;
            };
            let hit = adversaries.iter().position(|&adversary| {
                arena
                    .get(adversary)
                    .is_some_and(|a| a.bounds().overlaps(&shot))
            });
            let Some(index) = hit else {
                continue;
            };
            let adversary = adversaries.remove(index);
            arena.despawn(projectile);
            arena.despawn(adversary);

            let score = award_kill(arena, config.reward_per_kill);
            log.push(SimEvent::AdversaryDestroyed {
                adversary,
                projectile,
                score,
            });
            outcome.kills.push((projectile, adversary));
        }

        let Some(player_bounds) = arena.player().map(crate::entity::Entity::bounds) else {
            return outcome;
        };
        for adversary in adversaries {
            let touching = arena
                .get(adversary)
                .is_some_and(|a| a.bounds().overlaps(&player_bounds));
            if !touching {
                continue;
            }
            arena.despawn(adversary);
            let lives = lose_life(arena);
            tracing::debug!(%adversary, lives, "player hit");
            log.push(SimEvent::PlayerHit { adversary, lives });
            outcome.player_hits.push(adversary);
        }

        let out_of_lives = arena
            .player()
            .and_then(|p| p.as_player())
            .is_some_and(|state| state.lives < 1);
        if out_of_lives {
            outcome.reset = Some(reset_arena(arena, config, log));
        }
        outcome
    }
}

fn award_kill(arena: &mut Arena, reward: u64) -> u64 {
    arena
        .player_mut()
        .and_then(|p| p.as_player_mut())
        .map_or(0, |state| {
            state.score = state.score.saturating_add(reward);
            state.kills += 1;
            state.score
        })
}

fn lose_life(arena: &mut Arena) -> u32 {
    arena
        .player_mut()
        .and_then(|p| p.as_player_mut())
        .map_or(0, |state| {
            state.lives = state.lives.saturating_sub(1);
            state.lives
        })
}

/// Clears every non-player entity and replaces the player with a fresh one
/// at the start position. Returns the new player's id.
///
/// The new player starts with `initial_lives` and zero score, but keeps the
/// old `next_fire_ms` so the fire cooldown cannot be skipped by dying.
pub fn reset_arena(arena: &mut Arena, config: &SimConfig, log: &mut EventLog) -> EntityId {
    let (final_score, next_fire_ms) = arena
        .player()
        .and_then(|p| p.as_player())
        .map_or((0, 0), |state| (state.score, state.next_fire_ms));

    let cleared = arena.clear_non_player();
    let player = arena.spawn_player(
        config.player_start(),
        config.profiles.player.size,
        PlayerState {
            next_fire_ms,
            ..PlayerState::new(config.initial_lives)
        },
    );
    tracing::debug!(final_score, cleared, %player, "simulation reset");
    log.push(SimEvent::SimulationReset {
        final_score,
        player,
    });
    player
}
