//! Alarm tone synthesis.
//!
//! Generates the beep buffer that the audio adapter loops while the alarm
//! is active.  Key properties:
//! - Pure function of its parameters (deterministic output)
//! - Whole number of cycles per buffer when `freq_hz * duration_ms` is a
//!   multiple of 1000, so looping is click-free
//! - Samples bounded by `amplitude`

use core::f32::consts::TAU;

use crate::config::SimConfig;

/// Parameters of the looped alarm beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeepSpec {
    pub freq_hz: u32,
    pub duration_ms: u32,
    pub amplitude: f32,
}

impl BeepSpec {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            freq_hz: config.tone_freq_hz,
            duration_ms: config.tone_duration_ms,
            amplitude: config.tone_amplitude,
        }
    }
}

impl Default for BeepSpec {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

/// Number of mono samples in a beep of `duration_ms` at `sample_rate`.
#[inline]
pub fn beep_len(sample_rate: u32, duration_ms: u32) -> usize {
    (u64::from(sample_rate) * u64::from(duration_ms) / 1000) as usize
}

/// Generate one mono sine beep.
///
/// # Examples
/// ```
/// use alarmsim::tone::{generate_beep, BeepSpec};
/// let beep = generate_beep(44_100, &BeepSpec::default());
/// assert_eq!(beep.len(), 8_820); // 200 ms at 44.1 kHz
/// ```
pub fn generate_beep(sample_rate: u32, spec: &BeepSpec) -> Vec<f32> {
    let n = beep_len(sample_rate, spec.duration_ms);
    let amplitude = spec.amplitude.clamp(0.0, 1.0);
    let step = spec.freq_hz as f32 / sample_rate as f32;

    (0..n)
        .map(|i| {
            // Wrap the phase each sample so precision holds for long buffers.
            let phase = (i as f32 * step).fract();
            amplitude * (TAU * phase).sin()
        })
        .collect()
}
