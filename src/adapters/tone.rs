//! Tone emitter adapters.
//!
//! - [`SilentTone`] tracks the playing flag and logs transitions.  Used with
//!   `--mute`, in headless runs, and in builds without the `audio` feature
//!   (see [`wants_device`]).
//! - [`CpalTone`] (feature `audio`) loops the pre-generated beep on the
//!   default output device.  The callback reads two atomics: `active`
//!   gates output, `restart` rewinds the loop to sample 0 so every alarm
//!   starts on a fresh beep.

#[cfg(feature = "audio")]
use std::sync::Arc;
#[cfg(feature = "audio")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "audio")]
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::info;
#[cfg(feature = "audio")]
use log::{debug, error};

use crate::app::ports::TonePort;
use crate::config::SimConfig;
#[cfg(feature = "audio")]
use crate::error::{Result, ToneError};
#[cfg(feature = "audio")]
use crate::tone::{BeepSpec, generate_beep};

// ───────────────────────────────────────────────────────────────
// SilentTone
// ───────────────────────────────────────────────────────────────

/// Tone port with no audio backend.
#[derive(Debug, Default)]
pub struct SilentTone {
    playing: bool,
}

impl SilentTone {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TonePort for SilentTone {
    fn start_continuous_tone(&mut self) {
        if !self.playing {
            info!("Alarm tone on (muted)");
            self.playing = true;
        }
    }

    fn stop_tone(&mut self) {
        if self.playing {
            info!("Alarm tone off (muted)");
            self.playing = false;
        }
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

// ───────────────────────────────────────────────────────────────
// CpalTone
// ───────────────────────────────────────────────────────────────

/// Continuous beep on the default output device.
///
/// The stream runs for the adapter's whole lifetime and writes silence
/// while inactive, so start/stop never touch the device.
#[cfg(feature = "audio")]
pub struct CpalTone {
    _stream: cpal::Stream,
    active: Arc<AtomicBool>,
    restart: Arc<AtomicBool>,
}

#[cfg(feature = "audio")]
impl CpalTone {
    /// Open the default output device and start a (silent) stream.
    ///
    /// Only `f32` output is supported.
    pub fn open(spec: &BeepSpec) -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or_else(|| {
            error!("No default output device found");
            ToneError::NoOutputDevice
        })?;

        let supported = device.default_output_config().map_err(|e| {
            error!("Failed to get default output config: {}", e);
            ToneError::ConfigUnavailable
        })?;
        if supported.sample_format() != cpal::SampleFormat::F32 {
            error!(
                "Output format {:?} unsupported, need f32",
                supported.sample_format()
            );
            return Err(ToneError::UnsupportedFormat.into());
        }

        let config = supported.config();
        let sample_rate = config.sample_rate.0;
        let channels = usize::from(config.channels).max(1);
        let beep = generate_beep(sample_rate, spec);

        let active = Arc::new(AtomicBool::new(false));
        let restart = Arc::new(AtomicBool::new(false));
        let cb_active = Arc::clone(&active);
        let cb_restart = Arc::clone(&restart);
        let mut pos = 0usize;

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if cb_restart.swap(false, Ordering::AcqRel) {
                        pos = 0;
                    }
                    let on = cb_active.load(Ordering::Acquire) && !beep.is_empty();
                    for frame in data.chunks_mut(channels) {
                        let sample = if on {
                            let s = beep[pos];
                            pos = (pos + 1) % beep.len();
                            s
                        } else {
                            0.0
                        };
                        frame.fill(sample);
                    }
                },
                |err| error!("Output stream error: {}", err),
                None,
            )
            .map_err(|e| {
                error!("Failed to build output stream: {}", e);
                ToneError::StreamOpenFailed
            })?;

        stream.play().map_err(|e| {
            error!("Failed to start output stream: {}", e);
            ToneError::PlayFailed
        })?;

        debug!(
            "Output stream open: {} Hz, {} ch, {} Hz beep",
            sample_rate, channels, spec.freq_hz
        );

        Ok(Self {
            _stream: stream,
            active,
            restart,
        })
    }
}

#[cfg(feature = "audio")]
impl TonePort for CpalTone {
    fn start_continuous_tone(&mut self) {
        if !self.active.swap(true, Ordering::AcqRel) {
            self.restart.store(true, Ordering::Release);
            info!("Alarm tone on");
        }
    }

    fn stop_tone(&mut self) {
        if self.active.swap(false, Ordering::AcqRel) {
            info!("Alarm tone off");
        }
    }

    fn is_playing(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

// ───────────────────────────────────────────────────────────────
// AlarmTone
// ───────────────────────────────────────────────────────────────

/// Whether a run should open the audio device.
///
/// Headless runs never touch the device so scripted runs work on hosts
/// without a sound card.
pub fn wants_device(config: &SimConfig, headless: bool) -> bool {
    cfg!(feature = "audio") && config.audio_enabled && !headless
}

/// Tone backend chosen at startup.
pub enum AlarmTone {
    Silent(SilentTone),
    #[cfg(feature = "audio")]
    Device(CpalTone),
}

impl AlarmTone {
    /// Silent unless [`wants_device`] holds; otherwise the output device,
    /// whose open failure is fatal.
    #[cfg(feature = "audio")]
    pub fn open(config: &SimConfig, headless: bool) -> Result<Self> {
        if !wants_device(config, headless) {
            info!("Audio disabled, alarm tone muted");
            return Ok(Self::Silent(SilentTone::new()));
        }
        CpalTone::open(&BeepSpec::from_config(config)).map(Self::Device)
    }

    #[cfg(not(feature = "audio"))]
    pub fn open(config: &SimConfig, _headless: bool) -> crate::error::Result<Self> {
        if config.audio_enabled {
            info!("Built without audio support, alarm tone muted");
        }
        Ok(Self::Silent(SilentTone::new()))
    }
}

impl TonePort for AlarmTone {
    fn start_continuous_tone(&mut self) {
        match self {
            Self::Silent(t) => t.start_continuous_tone(),
            #[cfg(feature = "audio")]
            Self::Device(t) => t.start_continuous_tone(),
        }
    }

    fn stop_tone(&mut self) {
        match self {
            Self::Silent(t) => t.stop_tone(),
            #[cfg(feature = "audio")]
            Self::Device(t) => t.stop_tone(),
        }
    }

    fn is_playing(&self) -> bool {
        match self {
            Self::Silent(t) => t.is_playing(),
            #[cfg(feature = "audio")]
            Self::Device(t) => t.is_playing(),
        }
    }
}
