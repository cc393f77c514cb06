//! Read-only frame data for a presentation layer.

use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;
use crate::config::AssetRef;
use crate::entity::{EntityId, EntityKind};
use crate::simulation::Simulation;

/// One sprite to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    /// Entity drawn.
    pub id: EntityId,
    /// Its kind.
    pub kind: EntityKind,
    /// Screen-space box, `y` growing downward.
    pub bounds: Aabb,
    /// Image to draw in `bounds`.
    pub asset: AssetRef,
}

/// Heads-up display values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    /// Lives left.
    pub lives: u32,
    /// Current score.
    pub score: u64,
    /// Adversaries destroyed by projectiles.
    pub kills: u64,
}

/// Everything a presenter needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Completed ticks.
    pub tick: u64,
    /// Simulated time.
    pub clock_ms: u64,
    /// Entities in id order.
    pub entities: Vec<DrawItem>,
    /// Player stats.
    pub hud: Hud,
}

impl FrameSnapshot {
    /// Captures the current state of `sim`.
    #[must_use]
    pub fn capture(sim: &Simulation) -> Self {
        let profiles = &sim.config().profiles;
        let entities = sim
            .arena()
            .entities_sorted()
            .map(|entity| DrawItem {
                id: entity.id(),
                kind: entity.kind(),
                bounds: entity.bounds(),
                asset: profiles.get(entity.kind()).asset.clone(),
            })
            .collect();
        let hud = sim.player_state().map_or_else(Hud::default, |state| Hud {
            lives: state.lives,
            score: state.score,
            kills: state.kills,
        });

        Self {
            tick: sim.clock().tick(),
            clock_ms: sim.clock().now_ms(),
            entities,
            hud,
        }
    }

    /// Number of items of `kind`.
    #[must_use]
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|item| item.kind == kind).count()
    }
}
