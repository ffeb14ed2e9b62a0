//! Monotonic clock adapter.
//!
//! Milliseconds since the adapter was created, from `std::time::Instant`.
//! The blink phase and telemetry schedule both key off this value, so a
//! run always starts with the blink in its "on" half.

use std::time::Instant;

use crate::app::ports::ClockPort;

pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
