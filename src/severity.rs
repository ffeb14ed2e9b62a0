//! Severity classifier.
//!
//! Maps the loudest of the three gas channels onto one of four discrete
//! tiers.  Classification is memoryless: every frame is judged on its own
//! snapshot, with no hysteresis or smoothing.
//!
//! | max intensity | tier     | sensor flags (A, B) |
//! |---------------|----------|---------------------|
//! | `[0.0, 0.2)`  | Clean    | (0, 0)              |
//! | `[0.2, 0.5)`  | Moderate | (1, 0)              |
//! | `[0.5, 0.8)`  | Risky    | (0, 1)              |
//! | `[0.8, 1.0]`  | Critical | (1, 1)              |

use serde::Serialize;

/// Number of simulated gas channels.
pub const CHANNEL_COUNT: usize = 3;

/// Channel labels, in slider order.
pub const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = ["CO", "CO2", "CH4"];

/// Lower (inclusive) bound of the Moderate tier.
pub const MODERATE_THRESHOLD: f32 = 0.2;
/// Lower (inclusive) bound of the Risky tier.
pub const RISKY_THRESHOLD: f32 = 0.5;
/// Lower (inclusive) bound of the Critical tier.
pub const CRITICAL_THRESHOLD: f32 = 0.8;

/// Discrete severity derived from the maximum channel intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Clean,
    Moderate,
    Risky,
    Critical,
}

impl SeverityTier {
    pub const ALL: [Self; 4] = [Self::Clean, Self::Moderate, Self::Risky, Self::Critical];

    /// The two sensor indicator flags `(sensor_a, sensor_b)` this tier arms.
    pub const fn sensor_flags(self) -> (bool, bool) {
        match self {
            Self::Clean => (false, false),
            Self::Moderate => (true, false),
            Self::Risky => (false, true),
            Self::Critical => (true, true),
        }
    }

    /// Inverse of [`sensor_flags`](Self::sensor_flags).
    pub const fn from_sensor_flags(sensor_a: bool, sensor_b: bool) -> Self {
        match (sensor_a, sensor_b) {
            (false, false) => Self::Clean,
            (true, false) => Self::Moderate,
            (false, true) => Self::Risky,
            (true, true) => Self::Critical,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clean => "clean air",
            Self::Moderate => "moderate",
            Self::Risky => "risky",
            Self::Critical => "critical",
        }
    }
}

/// Clamp a raw reading into `[0, 1]`.  NaN reads as 0.
pub fn clamp_intensity(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Classify a single (maximum) intensity.  Total over all `f32`.
pub fn classify(max_intensity: f32) -> SeverityTier {
    let x = clamp_intensity(max_intensity);
    if x < MODERATE_THRESHOLD {
        SeverityTier::Clean
    } else if x < RISKY_THRESHOLD {
        SeverityTier::Moderate
    } else if x < CRITICAL_THRESHOLD {
        SeverityTier::Risky
    } else {
        SeverityTier::Critical
    }
}

/// Largest clamped intensity across all channels.
pub fn max_intensity(values: &[f32; CHANNEL_COUNT]) -> f32 {
    values
        .iter()
        .copied()
        .map(clamp_intensity)
        .fold(0.0, f32::max)
}

/// Classify a full channel snapshot.
pub fn classify_channels(values: &[f32; CHANNEL_COUNT]) -> SeverityTier {
    classify(max_intensity(values))
}
