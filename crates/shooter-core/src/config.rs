//! Simulation configuration.
//!
//! Defaults describe a 918x573 playfield with 64-unit ships at a 60 Hz tick.
//! `SimConfig` deserialises with `#[serde(default)]`, so a config file only
//! needs the fields it overrides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::error::{SimError, SimResult};

/// Reference to a visual asset, resolved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Creates an asset reference from a path-like string.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The referenced path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-kind attributes: what the sprite looks like, how big it is, how fast
/// it moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindProfile {
    /// Sprite reference for the presentation layer.
    pub asset: AssetRef,
    /// Bounding box size.
    pub size: Vec2,
    /// Speed in playfield units per tick.
    pub base_speed: f32,
}

impl KindProfile {
    fn new(asset: &str, size: f32, base_speed: f32) -> Self {
        Self {
            asset: AssetRef::new(asset),
            size: Vec2::splat(size),
            base_speed,
        }
    }
}

/// Profiles for every entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindProfiles {
    /// Player ship.
    pub player: KindProfile,
    /// Adversary.
    pub adversary: KindProfile,
    /// Projectile.
    pub projectile: KindProfile,
}

impl KindProfiles {
    /// Profile for `kind`.
    #[must_use]
    pub const fn get(&self, kind: EntityKind) -> &KindProfile {
        match kind {
            EntityKind::Player => &self.player,
            EntityKind::Adversary => &self.adversary,
            EntityKind::Projectile => &self.projectile,
        }
    }

    /// Iterate `(kind, profile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &KindProfile)> {
        [
            (EntityKind::Player, &self.player),
            (EntityKind::Adversary, &self.adversary),
            (EntityKind::Projectile, &self.projectile),
        ]
        .into_iter()
    }
}

impl Default for KindProfiles {
    fn default() -> Self {
        Self {
            player: KindProfile::new("assets/spaceship.png", 64.0, 5.0),
            adversary: KindProfile::new("assets/rocket.png", 64.0, 1.0),
            projectile: KindProfile::new("assets/laser.png", 32.0, 10.0),
        }
    }
}

/// When the spawn interval is drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalPolicy {
    /// Draw once when the simulation starts.
    #[default]
    RollOnce,
    /// Draw a fresh interval every tick.
    RerollEveryTick,
}

/// How the input resolver interprets input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Poll the held-key snapshot every tick.
    #[default]
    Level,
    /// React to press/release events.
    Edge,
}

/// Configuration consumed by the simulation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Playfield width.
    pub width: f32,
    /// Playfield height.
    pub height: f32,
    /// Simulated milliseconds per tick.
    pub tick_ms: u64,
    /// Target tick rate for the loop pacer.
    pub tick_rate_hz: u32,
    /// Delay between two shots.
    pub reload_ms: u64,
    /// Lower bound of the spawn interval.
    pub spawn_interval_min_ms: u64,
    /// Upper bound of the spawn interval (inclusive).
    pub spawn_interval_max_ms: u64,
    /// When the spawn interval is drawn.
    pub interval_policy: IntervalPolicy,
    /// Adversaries per spawn batch.
    pub batch_size: u32,
    /// Grid cells tried per adversary before it is skipped.
    pub max_placement_attempts: u32,
    /// Anchor y for new adversaries. Defaults to `height / 10`.
    pub spawn_y: Option<f32>,
    /// Fraction of the width at each edge that makes adversaries turn.
    pub boundary_margin: f32,
    /// Downward step applied on each adversary bounce.
    pub drop_step: f32,
    /// Score awarded per adversary destroyed by a projectile.
    pub reward_per_kill: u64,
    /// Lives at start and after a reset.
    pub initial_lives: u32,
    /// Player anchor at start. Defaults to `(width / 2, height * 0.95)`.
    pub player_start: Option<Vec2>,
    /// Projectile spawn point relative to the player anchor.
    pub projectile_offset: Vec2,
    /// Input interpretation.
    pub input_mode: InputMode,
    /// Keep the player inside the playfield.
    pub clamp_player: bool,
    /// Remove adversaries that fall past the bottom edge.
    pub despawn_escaped_adversaries: bool,
    /// Per-kind attributes.
    pub profiles: KindProfiles,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 918.0,
            height: 573.0,
            tick_ms: 16,
            tick_rate_hz: 60,
            reload_ms: 150,
            spawn_interval_min_ms: 1000,
            spawn_interval_max_ms: 3000,
            interval_policy: IntervalPolicy::RollOnce,
            batch_size: 1,
            max_placement_attempts: 32,
            spawn_y: None,
            boundary_margin: 0.05,
            drop_step: 64.0,
            reward_per_kill: 10,
            initial_lives: 3,
            player_start: None,
            projectile_offset: Vec2::new(-2.0, -35.0),
            input_mode: InputMode::Level,
            clamp_player: false,
            despawn_escaped_adversaries: true,
            profiles: KindProfiles::default(),
        }
    }
}

impl SimConfig {
    /// Player anchor at start and after reset.
    #[must_use]
    pub fn player_start(&self) -> Vec2 {
        self.player_start
            .unwrap_or_else(|| Vec2::new(self.width * 0.5, self.height * 0.95))
    }

    /// Anchor y for newly spawned adversaries.
    #[must_use]
    pub fn spawn_y(&self) -> f32 {
        self.spawn_y.unwrap_or(self.height / 10.0)
    }

    /// Left edge of the interior band (start of the right-hand margin is
    /// [`SimConfig::right_margin_x`]).
    #[must_use]
    pub fn left_margin_x(&self) -> f32 {
        self.width * self.boundary_margin
    }

    /// Start of the right-hand margin.
    #[must_use]
    pub fn right_margin_x(&self) -> f32 {
        self.width * (1.0 - self.boundary_margin)
    }

    /// Anchor x of every spawn grid cell.
    ///
    /// Cells are adversary-width wide, aligned to multiples of that width,
    /// and only cells lying fully between the two margins are used.
    #[must_use]
    pub fn spawn_columns(&self) -> Vec<f32> {
        let cell = self.profiles.adversary.size.x;
        if cell <= 0.0 || !cell.is_finite() {
            return Vec::new();
        }
        let (lo, hi) = (self.left_margin_x(), self.right_margin_x());
        let mut columns = Vec::new();
        let mut left = 0.0_f32;
        while left + cell <= self.width {
            if left >= lo && left + cell <= hi {
                columns.push(left + cell * 0.5);
            }
            left += cell;
        }
        columns
    }

    /// Checks every value and returns the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(SimError::config("width", "must be positive and finite"));
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(SimError::config("height", "must be positive and finite"));
        }
        if self.tick_ms == 0 {
            return Err(SimError::config("tick_ms", "must be at least 1"));
        }
        if self.tick_rate_hz == 0 {
            return Err(SimError::config("tick_rate_hz", "must be at least 1"));
        }
        if self.spawn_interval_min_ms > self.spawn_interval_max_ms {
            return Err(SimError::config(
                "spawn_interval_min_ms",
                format!(
                    "{} exceeds spawn_interval_max_ms {}",
                    self.spawn_interval_min_ms, self.spawn_interval_max_ms
                ),
            ));
        }
        if self.batch_size == 0 {
            return Err(SimError::config("batch_size", "must be at least 1"));
        }
        if self.max_placement_attempts == 0 {
            return Err(SimError::config(
                "max_placement_attempts",
                "must be at least 1",
            ));
        }
        if !(0.0..0.5).contains(&self.boundary_margin) {
            return Err(SimError::config(
                "boundary_margin",
                "must lie in [0, 0.5)",
            ));
        }
        if self.initial_lives == 0 {
            return Err(SimError::config("initial_lives", "must be at least 1"));
        }
        for (kind, profile) in self.profiles.iter() {
            if !(profile.size.x > 0.0 && profile.size.y > 0.0) {
                return Err(SimError::config(
                    "profiles",
                    format!("{kind} size must be strictly positive"),
                ));
            }
            if !(profile.base_speed >= 0.0 && profile.base_speed.is_finite()) {
                return Err(SimError::config(
                    "profiles",
                    format!("{kind} base_speed must be non-negative"),
                ));
            }
        }

        if self.clamp_player && self.profiles.player.size.x > self.width {
            return Err(SimError::config(
                "clamp_player",
                "player is wider than the playfield",
            ));
        }

        let columns = self.spawn_columns().len();
        if columns == 0 {
            return Err(SimError::config(
                "profiles",
                "adversary is wider than the spawnable band",
            ));
        }
        if columns < self.batch_size as usize {
            tracing::warn!(
                columns,
                batch_size = self.batch_size,
                "spawn grid has fewer cells than the batch size; some adversaries will be skipped"
            );
        }
        Ok(())
    }
}
