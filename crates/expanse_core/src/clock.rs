use serde::{Deserialize, Serialize};

/// The world's single source of time.
///
/// Every timed behaviour (hazard spawning, cooldowns, decay, autosave) is
/// expressed in ticks. `ticks_per_second` is only used to convert to and from
/// simulated seconds for display and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldClock {
    tick: u64,
    ticks_per_second: u32,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new(60)
    }
}

impl WorldClock {
    #[must_use]
    pub fn new(ticks_per_second: u32) -> Self {
        Self::at(0, ticks_per_second)
    }

    #[must_use]
    pub fn at(tick: u64, ticks_per_second: u32) -> Self {
        Self {
            tick,
            ticks_per_second: ticks_per_second.max(1),
        }
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    /// Moves the clock forward by exactly one tick and returns the new tick.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// True on ticks that are a positive multiple of `period`. A zero period
    /// is never due.
    #[must_use]
    pub fn is_due(&self, period: u64) -> bool {
        period > 0 && self.tick.is_multiple_of(period)
    }

    #[must_use]
    pub fn seconds_to_ticks(&self, seconds: f64) -> u64 {
        (seconds.max(0.0) * f64::from(self.ticks_per_second)).round() as u64
    }

    #[must_use]
    pub fn ticks_to_seconds(&self, ticks: u64) -> f64 {
        ticks as f64 / f64::from(self.ticks_per_second)
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.ticks_to_seconds(self.tick)
    }
}
