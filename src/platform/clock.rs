//! Monotonic level timers

use std::time::Instant;

/// Elapsed-time source for the level timer
pub trait Clock {
    /// Reset elapsed time to zero
    fn restart(&mut self);

    /// Seconds since the last restart
    fn elapsed_secs(&self) -> f32;

    /// Called by the level once per update with the frame delta.
    /// Wall-clock timers ignore it.
    fn advance(&mut self, _dt: f32) {}
}

/// Wall-clock timer backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn restart(&mut self) {
        self.started = Instant::now();
    }

    fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

/// Simulated timer that only moves when frames are stepped.
///
/// Used by the headless runner and tests so elapsed time is exactly the sum of
/// the frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    elapsed: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for FrameClock {
    fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }
}
