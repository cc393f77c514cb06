//! Time-driven input for unattended runs.

use shooter_core::input::{KeyState, TickInput};
use shooter_core::runner::InputSource;
use shooter_core::Simulation;

/// Sweeps the player back and forth around its start position while
/// holding fire.
///
/// The sweep is a function of the clock only, so a run with the autopilot
/// is as repeatable as a scripted one.
#[derive(Debug, Clone)]
pub struct Autopilot {
    leg_ms: u64,
}

impl Autopilot {
    /// Sizes each leg of the sweep to 40% of the playfield width.
    pub fn new(sim: &Simulation) -> Self {
        let config = sim.config();
        let speed = config.profiles.player.base_speed.max(1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let leg_ticks = (config.width * 0.4 / speed).max(1.0) as u64;
        Self {
            leg_ms: leg_ticks * config.tick_ms.max(1),
        }
    }

    fn movement(&self, clock_ms: u64) -> KeyState {
        // right, back to centre, left, back to centre
        match (clock_ms / self.leg_ms) % 4 {
            0 | 3 => KeyState::RIGHT,
            _ => KeyState::LEFT,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, clock_ms: u64) -> TickInput {
        TickInput::held(self.movement(clock_ms) | KeyState::FIRE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shooter_core::SimConfig;

    #[test]
    fn sweeps_and_fires() {
        let sim = Simulation::new(SimConfig::default(), 1).unwrap();
        let mut pilot = Autopilot::new(&sim);
        // 918 * 0.4 / 5 = 73 ticks of 16 ms per leg
        assert_eq!(pilot.leg_ms, 73 * 16);

        let first = pilot.poll(0);
        assert!(first.held.contains(KeyState::RIGHT | KeyState::FIRE));
        assert!(pilot.poll(pilot.leg_ms).held.contains(KeyState::LEFT));
        assert!(pilot.poll(pilot.leg_ms * 3).held.contains(KeyState::RIGHT));
    }

    #[test]
    fn stays_near_start() {
        let mut sim = Simulation::new(SimConfig::default(), 1).unwrap();
        let mut pilot = Autopilot::new(&sim);
        let start = sim.player().unwrap().position.x;
        for _ in 0..1000 {
            let input = pilot.poll(sim.clock().now_ms());
            sim.step(&input);
            if sim.player().is_some_and(|p| (p.position.x - start).abs() > 918.0 * 0.45) {
                panic!("autopilot drifted off the playfield");
            }
        }
    }
}
