//! Simulator configuration parameters
//!
//! Tunables for the frame loop, telemetry cadence, and alarm tone.  The
//! circuit itself (thresholds, LED table, blink rate) is fixed and lives
//! in [`crate::severity`] and [`crate::outputs`].  Values can be
//! overridden from a JSON file passed with `--config`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // --- Timing ---
    /// Frame evaluations per second
    pub tick_rate_hz: u32,
    /// Telemetry event interval (milliseconds, 0 = disabled)
    pub telemetry_interval_ms: u64,

    // --- Tone ---
    /// Alarm tone frequency (Hz)
    pub tone_freq_hz: u32,
    /// Length of the looped beep buffer (milliseconds)
    pub tone_duration_ms: u32,
    /// Peak amplitude of the beep (0.0-1.0)
    pub tone_amplitude: f32,
    /// Open the audio device at startup
    pub audio_enabled: bool,

    // --- Input ---
    /// Slider change per keyboard nudge (fraction of full scale)
    pub slider_step: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_rate_hz: 60,
            telemetry_interval_ms: 5000,

            // Tone
            tone_freq_hz: 1000,
            tone_duration_ms: 200,
            tone_amplitude: 0.5,
            audio_enabled: true,

            // Input
            slider_step: 0.05,
        }
    }
}

impl SimConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing or malformed file is not fatal: the problem is logged and
    /// defaults are returned.  Missing fields take their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Reject values the frame loop or tone generator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=240).contains(&self.tick_rate_hz) {
            return Err(Error::Config("tick_rate_hz must be within 1..=240"));
        }
        if !(20..=20_000).contains(&self.tone_freq_hz) {
            return Err(Error::Config("tone_freq_hz must be within 20..=20000"));
        }
        if !(10..=2000).contains(&self.tone_duration_ms) {
            return Err(Error::Config("tone_duration_ms must be within 10..=2000"));
        }
        if !(self.tone_amplitude > 0.0 && self.tone_amplitude <= 1.0) {
            return Err(Error::Config("tone_amplitude must be within (0, 1]"));
        }
        if !(self.slider_step > 0.0 && self.slider_step <= 1.0) {
            return Err(Error::Config("slider_step must be within (0, 1]"));
        }
        Ok(())
    }
}
