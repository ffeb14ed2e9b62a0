//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They describe edges
//! (tier changes, alarm raised/cleared) and periodic telemetry; the
//! per-frame outputs themselves go to the presentation port.

use crate::severity::{CHANNEL_COUNT, SeverityTier};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started.
    Started,

    /// The classified tier differs from the previous frame's.
    TierChanged {
        from: SeverityTier,
        to: SeverityTier,
    },

    /// The alarm turned on this frame.
    AlarmRaised { max_intensity: f32 },

    /// The alarm turned off this frame.
    AlarmCleared,

    /// Periodic snapshot.
    Telemetry(TelemetryData),

    /// The frame loop ended; carries the number of frames evaluated.
    Stopped { frames: u64 },
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub clock_ms: u64,
    pub frame: u64,
    pub intensities: [f32; CHANNEL_COUNT],
    pub max_intensity: f32,
    pub tier: SeverityTier,
    pub alarm_active: bool,
}
