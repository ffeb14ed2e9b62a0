//! Unified error types for the alarm simulator.
//!
//! The classifier and output mapper are total and never fail; only the
//! outer collaborators (terminal, audio device, config file) can.  Every
//! failure funnels into a single `Copy` [`Error`] so the frame loop's error
//! handling stays uniform.  Backend-specific detail (an `io::Error`, a cpal
//! error string) is logged where it happens and then dropped.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the simulator funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The presentation or input surface failed.
    Display(DisplayError),
    /// The tone emitter could not be opened or driven.
    Tone(ToneError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Tone(e) => write!(f, "tone: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Display / input surface errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Raw mode, alternate screen, or mouse capture could not be enabled.
    TerminalInit,
    /// Drawing a frame failed.
    DrawFailed,
    /// Polling or reading terminal input failed.
    InputFailed,
    /// Writing a headless frame record failed.
    WriteFailed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TerminalInit => write!(f, "terminal init failed"),
            Self::DrawFailed => write!(f, "frame draw failed"),
            Self::InputFailed => write!(f, "input read failed"),
            Self::WriteFailed => write!(f, "frame write failed"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Tone emitter errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneError {
    /// The host has no default output device.
    NoOutputDevice,
    /// The device's default output config could not be queried.
    ConfigUnavailable,
    /// The device's native sample format is not supported.
    UnsupportedFormat,
    /// Building the output stream failed.
    StreamOpenFailed,
    /// Starting playback on the stream failed.
    PlayFailed,
}

impl fmt::Display for ToneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOutputDevice => write!(f, "no default output device"),
            Self::ConfigUnavailable => write!(f, "output config unavailable"),
            Self::UnsupportedFormat => write!(f, "unsupported sample format"),
            Self::StreamOpenFailed => write!(f, "output stream open failed"),
            Self::PlayFailed => write!(f, "output stream play failed"),
        }
    }
}

impl From<ToneError> for Error {
    fn from(e: ToneError) -> Self {
        Self::Tone(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
