//! Output mapper: severity tier + clock → indicator colours and alarm flag.
//!
//! | tier     | sensor A | sensor B | LED 1 | LED 2   | LED 3 | LED 4 | alarm |
//! |----------|----------|----------|-------|---------|-------|-------|-------|
//! | Clean    | off      | off      | safe  | off     | off   | off   | no    |
//! | Moderate | warning  | off      | off   | warning | off   | off   | no    |
//! | Risky    | off      | warning  | off   | off     | alert | off   | no    |
//! | Critical | warning  | warning  | off   | off     | off   | blink | yes   |
//!
//! The mapping is a pure function of its inputs.  Nothing carries over
//! between frames, so the displayed LEDs and the tone can never drift
//! apart.

use serde::Serialize;

use crate::blink::blink;
use crate::severity::SeverityTier;

/// Number of status LEDs on the controller's output side.
pub const LED_COUNT: usize = 4;

/// Number of colourable indicator slots (two sensors + four LEDs).
pub const SLOT_COUNT: usize = 2 + LED_COUNT;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Fixed indicator palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Off,
    Warning,
    Alert,
    Safe,
}

impl Palette {
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Off => COLOUR_OFF,
            Self::Warning => COLOUR_WARNING,
            Self::Alert => COLOUR_ALERT,
            Self::Safe => COLOUR_SAFE,
        }
    }

    pub const fn is_lit(self) -> bool {
        !matches!(self, Self::Off)
    }
}

pub const COLOUR_OFF: Rgb = (0, 0, 0); // Black
pub const COLOUR_WARNING: Rgb = (255, 255, 0); // Yellow
pub const COLOUR_ALERT: Rgb = (255, 0, 0); // Red
pub const COLOUR_SAFE: Rgb = (0, 255, 0); // Green

/// Colour of every indicator on the diagram for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorState {
    pub sensor_a: Palette,
    pub sensor_b: Palette,
    pub leds: [Palette; LED_COUNT],
}

impl IndicatorState {
    /// How many LEDs are showing a colour.
    pub fn lit_led_count(&self) -> usize {
        self.leds.iter().filter(|c| c.is_lit()).count()
    }

    /// All six slots in drawing order: sensor A, sensor B, LED 1..4.
    pub fn slots(&self) -> [Palette; SLOT_COUNT] {
        let [l0, l1, l2, l3] = self.leds;
        [self.sensor_a, self.sensor_b, l0, l1, l2, l3]
    }
}

/// Everything the presentation surface and tone emitter need for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameOutputs {
    pub indicators: IndicatorState,
    pub alarm_active: bool,
}

/// Derive the frame's indicator colours and alarm flag.
pub fn map_outputs(tier: SeverityTier, clock_ms: u64) -> FrameOutputs {
    let (flag_a, flag_b) = tier.sensor_flags();
    let sensor_colour = |armed: bool| if armed { Palette::Warning } else { Palette::Off };

    let mut leds = [Palette::Off; LED_COUNT];
    match tier {
        SeverityTier::Clean => leds[0] = Palette::Safe,
        SeverityTier::Moderate => leds[1] = Palette::Warning,
        SeverityTier::Risky => leds[2] = Palette::Alert,
        SeverityTier::Critical => leds[3] = blink(clock_ms),
    }

    FrameOutputs {
        indicators: IndicatorState {
            sensor_a: sensor_colour(flag_a),
            sensor_b: sensor_colour(flag_b),
            leds,
        },
        alarm_active: tier == SeverityTier::Critical,
    }
}
