//! 5 Hz square-wave blink for the critical LED.
//!
//! The phase is derived from the absolute frame clock rather than from the
//! moment the alarm was raised, so leaving and re-entering the critical
//! tier resumes the global phase instead of restarting "on".

use crate::outputs::Palette;

/// Half-period of the blink: 100 ms on, 100 ms off.
pub const BLINK_HALF_PERIOD_MS: u64 = 100;

/// True during the "on" half of the blink cycle.
#[inline]
pub fn blink_phase_on(clock_ms: u64) -> bool {
    (clock_ms / BLINK_HALF_PERIOD_MS) % 2 == 0
}

/// Colour of the blinking LED at `clock_ms`.
#[inline]
pub fn blink(clock_ms: u64) -> Palette {
    if blink_phase_on(clock_ms) {
        Palette::Alert
    } else {
        Palette::Off
    }
}
