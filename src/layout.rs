//! Cell coordinates of every element on the circuit diagram.
//!
//! Single source of truth: the terminal renderer and the slider hit-testing
//! both reference this module rather than hard-coding positions.  All
//! values are terminal cells with the origin at the top-left corner.
//!
//! ```text
//!               INPUTS                        OUTPUTS
//!  ┌SENSOR A┐ ──────── ┌──CONTROLLER──┐ ────── ┌LED 1┐
//!  └────────┘          │              │ ────── ┌LED 2┐
//!  ┌SENSOR B┐ ──────── │              │ ────── ┌LED 3┐
//!  └────────┘          │              │ ────── ┌LED 4┐
//!                      └──────────────┘ ────── ┌ALARM┐
//!     CO   ●──────────────────────────  CO: 0%
//!     CO2  ●──────────────────────────  CO2: 0%
//!     CH4  ●──────────────────────────  CH4: 0%
//! ```

use crate::input::slider::SliderGeometry;
use crate::outputs::LED_COUNT;

/// Axis-aligned box in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub const fn mid_row(&self) -> u16 {
        self.y + self.height / 2
    }
}

// ---------------------------------------------------------------------------
// Diagram extent
// ---------------------------------------------------------------------------

pub const DIAGRAM_WIDTH: u16 = 72;
pub const DIAGRAM_HEIGHT: u16 = 25;

// ---------------------------------------------------------------------------
// Inputs (left)
// ---------------------------------------------------------------------------

pub const SENSOR_A: CellRect = CellRect::new(2, 3, 12, 3);
pub const SENSOR_B: CellRect = CellRect::new(2, 10, 12, 3);
pub const INPUTS_LABEL: (u16, u16) = (13, 1);

// ---------------------------------------------------------------------------
// Controller (centre)
// ---------------------------------------------------------------------------

pub const CONTROLLER: CellRect = CellRect::new(20, 1, 24, 15);

// ---------------------------------------------------------------------------
// Outputs (right)
// ---------------------------------------------------------------------------

/// LED boxes, top to bottom.
pub const LEDS: [CellRect; LED_COUNT] = [
    CellRect::new(50, 1, 12, 3),
    CellRect::new(50, 4, 12, 3),
    CellRect::new(50, 7, 12, 3),
    CellRect::new(50, 10, 12, 3),
];
pub const ALARM: CellRect = CellRect::new(50, 13, 12, 3);
pub const OUTPUTS_LABEL: (u16, u16) = (44, 0);

// ---------------------------------------------------------------------------
// Sliders (bottom)
// ---------------------------------------------------------------------------

pub const SLIDERS: SliderGeometry = SliderGeometry {
    x: 10,
    y_start: 18,
    width: 40,
    gap: 2,
    handle_tolerance: 1,
};

/// Column of the channel name printed left of each track.
pub const SLIDER_NAME_X: u16 = 3;
/// Column of the "NAME: NN%" readout right of each track.
pub const SLIDER_READOUT_X: u16 = SLIDERS.x + SLIDERS.width + 3;

pub const HELP_ROW: u16 = DIAGRAM_HEIGHT - 1;

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: &CellRect, b: &CellRect) -> bool {
        a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
    }

    #[test]
    fn boxes_do_not_overlap() {
        let mut all = vec![SENSOR_A, SENSOR_B, CONTROLLER, ALARM];
        all.extend_from_slice(&LEDS);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!overlaps(a, b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn everything_fits_the_diagram() {
        let mut all = vec![SENSOR_A, SENSOR_B, CONTROLLER, ALARM];
        all.extend_from_slice(&LEDS);
        for r in &all {
            assert!(r.right() <= DIAGRAM_WIDTH && r.bottom() <= DIAGRAM_HEIGHT);
        }
        let last_slider_row = SLIDERS.y_start + 2 * SLIDERS.gap;
        assert!(last_slider_row < HELP_ROW);
        assert!(SLIDER_READOUT_X + 10 <= DIAGRAM_WIDTH);
    }

    #[test]
    fn sliders_sit_below_the_circuit() {
        assert!(SLIDERS.y_start > CONTROLLER.bottom());
        assert!(SLIDERS.y_start > ALARM.bottom());
    }
}
