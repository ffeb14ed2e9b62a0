//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (terminal, headless recorder, audio device, log sink,
//! clock) implement these traits.  The [`AppService`](super::service::AppService)
//! and the [`Simulator`](crate::runtime::Simulator) consume them via
//! generics, so the classifier and mapper never touch a terminal or sound
//! card directly.

use serde::Serialize;

use crate::error::Result;
use crate::input::InputPoll;
use crate::outputs::FrameOutputs;
use crate::severity::{CHANNEL_COUNT, SeverityTier};

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: user → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the frame loop polls this once per frame.
pub trait InputPort {
    /// Drain pending user input without blocking.
    /// Returns [`InputPoll::Quit`] when the user asked to leave.
    fn poll(&mut self) -> Result<InputPoll>;

    /// Snapshot of the three channel intensities, each in `[0, 1]`.
    fn get_values(&self) -> [f32; CHANNEL_COUNT];
}

// ───────────────────────────────────────────────────────────────
// Presentation port (driven adapter: domain → screen)
// ───────────────────────────────────────────────────────────────

/// Everything a rendering sink needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameView {
    pub clock_ms: u64,
    pub intensities: [f32; CHANNEL_COUNT],
    pub tier: SeverityTier,
    #[serde(flatten)]
    pub outputs: FrameOutputs,
}

/// Write-side port: receives one colour assignment per indicator slot
/// every frame.
pub trait PresentationPort {
    fn present(&mut self, view: &FrameView) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Tone port (driven adapter: domain → speaker)
// ───────────────────────────────────────────────────────────────

/// Continuous alarm tone.  Both calls are idempotent: starting a playing
/// tone or stopping a silent one is a no-op.
pub trait TonePort {
    fn start_continuous_tone(&mut self);

    fn stop_tone(&mut self);

    fn is_playing(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds since the simulator started.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
