//! Simulated clock.

use serde::{Deserialize, Serialize};

/// Monotonic simulated time.
///
/// Starts at 0 and advances once per tick by the fixed tick delta or a
/// measured delta. Time is kept in whole milliseconds so spawn intervals and
/// reload delays compare exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    now_ms: u64,
    tick: u64,
}

impl SimClock {
    /// A clock at time 0, tick 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { now_ms: 0, tick: 0 }
    }

    /// Current simulated time in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Completes a tick that lasted `delta_ms`.
    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
        self.tick += 1;
    }
}
