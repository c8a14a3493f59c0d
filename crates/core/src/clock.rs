//! Fixed-tick timing: countdowns, sub-tick cadences, and the frame accumulator.

/// Duration of one simulation tick.
pub const TICK_SECONDS: f32 = 1.0 / 60.0;
/// Upper bound on ticks run for one long frame; the rest of the backlog is dropped.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds.max(0.0) }
    }

    pub fn idle() -> Self {
        Self { remaining: 0.0 }
    }

    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Returns true on the tick the countdown reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }
}

/// Fires a fixed number of times per elapsed interval, independent of tick length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cadence {
    interval: f32,
    accumulated: f32,
}

impl Cadence {
    pub fn new(interval: f32) -> Self {
        Self { interval: interval.max(f32::EPSILON), accumulated: 0.0 }
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn tick(&mut self, dt: f32) -> u32 {
        self.accumulated += dt;
        let mut fired = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// Converts variable frame time into whole simulation ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, frame_seconds: f32) -> u32 {
        self.accumulator += frame_seconds.max(0.0);
        let due = (self.accumulator / TICK_SECONDS).floor() as u32;
        if due > MAX_TICKS_PER_FRAME {
            self.accumulator = 0.0;
            return MAX_TICKS_PER_FRAME;
        }
        self.accumulator -= due as f32 * TICK_SECONDS;
        due
    }

    /// Fraction of a tick left over, for smoothing between ticks.
    pub fn alpha(&self) -> f32 {
        (self.accumulator / TICK_SECONDS).clamp(0.0, 1.0)
    }
}
