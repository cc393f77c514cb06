//! Input resolution: turns raw input into movement and fire intents.
//!
//! The input layer hands the core a [`TickInput`] every tick. It carries both
//! the press/release events that arrived since the last tick and a snapshot
//! of the keys held right now; [`InputMode`] decides which one drives the
//! player:
//!
//! - **Level**: movement and fire follow the held snapshot. Holding fire
//!   keeps firing, paced by the reload delay.
//! - **Edge**: events are folded into a latched held state. Movement follows
//!   the latch; one fire intent is produced per fire press.
//!
//! Opposite directions cancel. A fire intent only spawns a projectile once
//! the simulated clock has reached the player's `next_fire_ms`.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::config::{InputMode, SimConfig};
use crate::entity::{EntityId, EntityState, ProjectileState};
use crate::error::SimError;
use crate::event::{EventLog, SimEvent};

/// Logical keys understood by the core.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Fire.
    Fire,
    /// Leave the loop.
    Quit,
}

impl Key {
    /// Virtual-key code for left arrow.
    pub const CODE_LEFT: u32 = 0x25;
    /// Virtual-key code for right arrow.
    pub const CODE_RIGHT: u32 = 0x27;
    /// Virtual-key code for space.
    pub const CODE_FIRE: u32 = 0x20;
    /// Virtual-key code for escape.
    pub const CODE_QUIT: u32 = 0x1B;

    /// Decodes a virtual-key code.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InputDecode`] for codes that map to no key.
    pub fn from_code(code: u32) -> Result<Self, SimError> {
        match code {
            Self::CODE_LEFT => Ok(Self::Left),
            Self::CODE_RIGHT => Ok(Self::Right),
            Self::CODE_FIRE => Ok(Self::Fire),
            Self::CODE_QUIT => Ok(Self::Quit),
            _ => Err(SimError::InputDecode { code }),
        }
    }

    /// The virtual-key code for this key.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Left => Self::CODE_LEFT,
            Self::Right => Self::CODE_RIGHT,
            Self::Fire => Self::CODE_FIRE,
            Self::Quit => Self::CODE_QUIT,
        }
    }

    /// The flag for this key in a [`KeyState`].
    #[must_use]
    pub const fn flag(self) -> KeyState {
        match self {
            Self::Left => KeyState::LEFT,
            Self::Right => KeyState::RIGHT,
            Self::Fire => KeyState::FIRE,
            Self::Quit => KeyState::QUIT,
        }
    }
}

bitflags! {
    /// Set of keys currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct KeyState: u8 {
        /// Left held.
        const LEFT = 1 << 0;
        /// Right held.
        const RIGHT = 1 << 1;
        /// Fire held.
        const FIRE = 1 << 2;
        /// Quit held.
        const QUIT = 1 << 3;
    }
}

/// A press or release as delivered by the input layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKeyEvent {
    /// Virtual-key code.
    pub code: u32,
    /// `true` for press, `false` for release.
    pub pressed: bool,
}

impl RawKeyEvent {
    /// A press of `key`.
    #[must_use]
    pub const fn press(key: Key) -> Self {
        Self {
            code: key.code(),
            pressed: true,
        }
    }

    /// A release of `key`.
    #[must_use]
    pub const fn release(key: Key) -> Self {
        Self {
            code: key.code(),
            pressed: false,
        }
    }
}

/// Everything the input layer supplies for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    /// Events since the previous tick, oldest first.
    pub events: Vec<RawKeyEvent>,
    /// Keys held at poll time.
    pub held: KeyState,
    /// Window-close or equivalent quit signal.
    pub quit: bool,
}

impl TickInput {
    /// Input with only a held-key snapshot.
    #[must_use]
    pub fn held(held: KeyState) -> Self {
        Self {
            held,
            ..Self::default()
        }
    }

    /// Input with only events.
    #[must_use]
    pub fn events(events: Vec<RawKeyEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    /// Input carrying just the quit signal.
    #[must_use]
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

/// Net horizontal movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    /// No movement.
    #[default]
    None,
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
}

impl Movement {
    /// Net movement for a held-key set. Opposite keys cancel.
    #[must_use]
    pub fn from_keys(keys: KeyState) -> Self {
        match (keys.contains(KeyState::LEFT), keys.contains(KeyState::RIGHT)) {
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            _ => Self::None,
        }
    }

    /// Sign applied to the player's speed.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Intents resolved from one tick of input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Intents {
    /// Net horizontal movement.
    pub movement: Movement,
    /// The player asked to fire.
    pub fire: bool,
    /// The input layer asked to stop.
    pub quit: bool,
}

/// Result of [`InputResolver::resolve`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct InputOutcome {
    /// The resolved intents.
    pub intents: Intents,
    /// Projectile spawned this tick, if the fire intent was honored.
    pub fired: Option<EntityId>,
    /// Events that failed to decode.
    pub decode_errors: u32,
}

/// First stage of the tick.
#[derive(Debug, Clone, Default)]
pub struct InputResolver {
    mode: InputMode,
    latched: KeyState,
}

impl InputResolver {
    /// Creates a resolver for `mode`.
    #[must_use]
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            latched: KeyState::empty(),
        }
    }

    /// Keys latched from events (edge mode only).
    #[must_use]
    pub const fn latched(&self) -> KeyState {
        self.latched
    }

    /// Decodes `input` into intents without touching the simulation.
    ///
    /// Undecodable events are logged and counted, then ignored.
    pub fn decode(&mut self, input: &TickInput) -> (Intents, u32) {
        let mut errors = 0;
        let mut fire_pressed = false;
        let mut quit_pressed = false;

        for raw in &input.events {
            let key = match Key::from_code(raw.code) {
                Ok(key) => key,
                Err(err) => {
                    tracing::debug!(%err, "ignoring input event");
                    errors += 1;
                    continue;
                }
            };
            if raw.pressed {
                self.latched.insert(key.flag());
                fire_pressed |= key == Key::Fire;
                quit_pressed |= key == Key::Quit;
            } else {
                self.latched.remove(key.flag());
            }
        }

        let intents = match self.mode {
            InputMode::Level => Intents {
                movement: Movement::from_keys(input.held),
                fire: input.held.contains(KeyState::FIRE),
                quit: input.quit || quit_pressed || input.held.contains(KeyState::QUIT),
            },
            InputMode::Edge => Intents {
                movement: Movement::from_keys(self.latched),
                fire: fire_pressed,
                quit: input.quit || quit_pressed,
            },
        };
        (intents, errors)
    }

    /// Decodes `input`, sets the player's horizontal velocity and fires if
    /// the cooldown allows it.
    pub fn resolve(
        &mut self,
        input: &TickInput,
        arena: &mut Arena,
        clock_ms: u64,
        config: &SimConfig,
        log: &mut EventLog,
    ) -> InputOutcome {
        let (intents, decode_errors) = self.decode(input);

        let speed = config.profiles.player.base_speed;
        if let Some(player) = arena.player_mut() {
            player.velocity = Vec2::new(intents.movement.sign() * speed, 0.0);
        }

        let fired = if intents.fire {
            try_fire(arena, clock_ms, config, log)
        } else {
            None
        };

        InputOutcome {
            intents,
            fired,
            decode_errors,
        }
    }
}

/// Spawns a projectile if the player's cooldown has elapsed.
///
/// On success `next_fire_ms` advances by exactly `reload_ms`. When the
/// cooldown has not elapsed nothing changes.
pub fn try_fire(
    arena: &mut Arena,
    clock_ms: u64,
    config: &SimConfig,
    log: &mut EventLog,
) -> Option<EntityId> {
    let owner = arena.player_id()?;
    let player = arena.player_mut()?;
    let origin = player.position;
    let state = player.as_player_mut()?;
    if !state.can_fire(clock_ms) {
        return None;
    }
    state.next_fire_ms = state.next_fire_ms.saturating_add(config.reload_ms);

    let profile = &config.profiles.projectile;
    let position = origin + config.projectile_offset;
    let velocity = Vec2::new(0.0, -profile.base_speed);
    let projectile = arena.spawn_moving(
        position,
        profile.size,
        velocity,
        EntityState::Projectile(ProjectileState { owner }),
    );
    tracing::debug!(%projectile, clock_ms, "projectile fired");
    log.push(SimEvent::ProjectileFired {
        projectile,
        position,
        velocity,
    });
    Some(projectile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityKind, PlayerState};

    fn setup() -> (Arena, SimConfig) {
        let config = SimConfig::default();
        let mut arena = Arena::new();
        arena.spawn_player(
            config.player_start(),
            config.profiles.player.size,
            PlayerState::new(config.initial_lives),
        );
        (arena, config)
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn key_codes_roundtrip() {
            for key in [Key::Left, Key::Right, Key::Fire, Key::Quit] {
                assert_eq!(Key::from_code(key.code()), Ok(key));
            }
        }

        #[test]
        fn unknown_code_is_decode_error() {
            assert_eq!(
                Key::from_code(0x41),
                Err(SimError::InputDecode { code: 0x41 })
            );
        }

        #[test]
        fn opposite_keys_cancel() {
            assert_eq!(Movement::from_keys(KeyState::LEFT | KeyState::RIGHT), Movement::None);
            assert_eq!(Movement::from_keys(KeyState::LEFT), Movement::Left);
            assert_eq!(Movement::from_keys(KeyState::RIGHT), Movement::Right);
            assert_eq!(Movement::from_keys(KeyState::empty()), Movement::None);
        }

        #[test]
        fn level_mode_reads_snapshot() {
            let mut resolver = InputResolver::new(InputMode::Level);
            let (intents, errors) =
                resolver.decode(&TickInput::held(KeyState::RIGHT | KeyState::FIRE));
            assert_eq!(intents.movement, Movement::Right);
            assert!(intents.fire);
            assert!(!intents.quit);
            assert_eq!(errors, 0);
        }

        #[test]
        fn edge_mode_latches_presses() {
            let mut resolver = InputResolver::new(InputMode::Edge);
            let (intents, _) = resolver.decode(&TickInput::events(vec![RawKeyEvent::press(Key::Left)]));
            assert_eq!(intents.movement, Movement::Left);

            // No events: still held.
            let (intents, _) = resolver.decode(&TickInput::default());
            assert_eq!(intents.movement, Movement::Left);

            let (intents, _) =
                resolver.decode(&TickInput::events(vec![RawKeyEvent::release(Key::Left)]));
            assert_eq!(intents.movement, Movement::None);
        }

        #[test]
        fn edge_mode_fires_once_per_press() {
            let mut resolver = InputResolver::new(InputMode::Edge);
            let (intents, _) = resolver.decode(&TickInput::events(vec![RawKeyEvent::press(Key::Fire)]));
            assert!(intents.fire);
            let (intents, _) = resolver.decode(&TickInput::default());
            assert!(!intents.fire);
            assert!(resolver.latched().contains(KeyState::FIRE));
        }

        #[test]
        fn edge_mode_simultaneous_opposites_cancel() {
            let mut resolver = InputResolver::new(InputMode::Edge);
            let (intents, _) = resolver.decode(&TickInput::events(vec![
                RawKeyEvent::press(Key::Left),
                RawKeyEvent::press(Key::Right),
            ]));
            assert_eq!(intents.movement, Movement::None);
        }

        #[test]
        fn malformed_events_are_counted_and_skipped() {
            let mut resolver = InputResolver::new(InputMode::Edge);
            let (intents, errors) = resolver.decode(&TickInput::events(vec![
                RawKeyEvent {
                    code: 0xFFFF,
                    pressed: true,
                },
                RawKeyEvent::press(Key::Right),
                RawKeyEvent {
                    code: 0x00,
                    pressed: false,
                },
            ]));
            assert_eq!(errors, 2);
            assert_eq!(intents.movement, Movement::Right);
        }

        #[test]
        fn quit_sources() {
            let mut resolver = InputResolver::new(InputMode::Level);
            assert!(resolver.decode(&TickInput::quit()).0.quit);
            assert!(resolver.decode(&TickInput::held(KeyState::QUIT)).0.quit);
            assert!(
                resolver
                    .decode(&TickInput::events(vec![RawKeyEvent::press(Key::Quit)]))
                    .0
                    .quit
            );
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn movement_sets_player_velocity() {
            let (mut arena, config) = setup();
            let mut resolver = InputResolver::new(InputMode::Level);
            let mut log = EventLog::new();
            resolver.resolve(&TickInput::held(KeyState::LEFT), &mut arena, 0, &config, &mut log);
            assert_eq!(arena.player().unwrap().velocity, Vec2::new(-5.0, 0.0));

            resolver.resolve(&TickInput::default(), &mut arena, 0, &config, &mut log);
            assert_eq!(arena.player().unwrap().velocity, Vec2::ZERO);
        }

        #[test]
        fn fire_spawns_projectile_at_offset() {
            let (mut arena, config) = setup();
            let mut log = EventLog::new();
            let id = try_fire(&mut arena, 160, &config, &mut log).unwrap();

            let projectile = arena.get(id).unwrap();
            assert_eq!(projectile.kind(), EntityKind::Projectile);
            assert!((projectile.position.x - 457.0).abs() < 1e-3);
            assert!((projectile.position.y - 509.35).abs() < 1e-3);
            assert_eq!(projectile.velocity, Vec2::new(0.0, -10.0));
            assert_eq!(projectile.size(), Vec2::splat(32.0));
            assert_eq!(
                projectile.as_projectile().unwrap().owner,
                arena.player_id().unwrap()
            );
            assert_eq!(arena.player().unwrap().as_player().unwrap().next_fire_ms, 150);
            assert_eq!(log.events().len(), 1);
        }

        #[test]
        fn fire_rejected_during_cooldown() {
            let (mut arena, config) = setup();
            let mut log = EventLog::new();
            arena.player_mut().unwrap().as_player_mut().unwrap().next_fire_ms = 300;

            assert!(try_fire(&mut arena, 299, &config, &mut log).is_none());
            assert_eq!(arena.count_of(EntityKind::Projectile), 0);
            assert_eq!(arena.player().unwrap().as_player().unwrap().next_fire_ms, 300);
            assert!(log.events().is_empty());

            assert!(try_fire(&mut arena, 300, &config, &mut log).is_some());
            assert_eq!(arena.player().unwrap().as_player().unwrap().next_fire_ms, 450);
        }

        #[test]
        fn resolve_reports_fired_projectile() {
            let (mut arena, config) = setup();
            let mut resolver = InputResolver::new(InputMode::Level);
            let mut log = EventLog::new();
            let outcome = resolver.resolve(
                &TickInput::held(KeyState::FIRE),
                &mut arena,
                0,
                &config,
                &mut log,
            );
            assert!(outcome.intents.fire);
            assert!(outcome.fired.is_some());

            let outcome = resolver.resolve(
                &TickInput::held(KeyState::FIRE),
                &mut arena,
                16,
                &config,
                &mut log,
            );
            assert!(outcome.fired.is_none());
            assert_eq!(arena.count_of(EntityKind::Projectile), 1);
        }
    }
}
