//! Kind-specific state carried by each entity.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// State for the player ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Remaining lives.
    pub lives: u32,
    /// Accumulated score.
    pub score: u64,
    /// Number of adversaries destroyed by projectiles.
    pub kills: u64,
    /// Earliest simulated time (ms) at which the next shot is allowed.
    pub next_fire_ms: u64,
}

impl PlayerState {
    /// Fresh player state with the given number of lives.
    #[must_use]
    pub const fn new(lives: u32) -> Self {
        Self {
            lives,
            score: 0,
            kills: 0,
            next_fire_ms: 0,
        }
    }

    /// Returns `true` if a shot is allowed at `clock_ms`.
    #[must_use]
    pub const fn can_fire(&self, clock_ms: u64) -> bool {
        clock_ms >= self.next_fire_ms
    }
}

/// Playfield side used by the adversary bounce latch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left margin.
    Left,
    /// Right margin.
    Right,
}

/// State for an adversary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdversaryState {
    /// Persistent sweep sign. `+1` moves toward smaller x.
    pub direction: i8,
    /// Margin the adversary is currently inside, if it already bounced there.
    pub bounce_latch: Option<Side>,
}

impl AdversaryState {
    /// Horizontal velocity sign derived from `direction`.
    #[must_use]
    pub fn heading(&self) -> f32 {
        -f32::from(self.direction)
    }
}

impl Default for AdversaryState {
    fn default() -> Self {
        Self {
            direction: 1,
            bounce_latch: None,
        }
    }
}

/// State for a projectile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Player that fired the projectile.
    pub owner: EntityId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_fire_gate_is_inclusive() {
        let mut player = PlayerState::new(3);
        player.next_fire_ms = 150;
        assert!(!player.can_fire(149));
        assert!(player.can_fire(150));
        assert!(player.can_fire(151));
    }

    #[test]
    fn adversary_defaults_sweep_left() {
        let adversary = AdversaryState::default();
        assert_eq!(adversary.direction, 1);
        assert!((adversary.heading() + 1.0).abs() < f32::EPSILON);
        assert!(adversary.bounce_latch.is_none());
    }

    #[test]
    fn component_structs_are_serializable() {
        let player = PlayerState::new(3);
        let json = serde_json::to_string(&player).unwrap();
        let back: PlayerState = serde_json::from_str(&json).unwrap();
        assert_eq!(player, back);
    }
}
