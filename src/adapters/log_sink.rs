//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events through the `log`
//! facade.  The binary routes them to a file (terminal mode) or stderr
//! (headless mode).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                let [co, co2, ch4] = t.intensities;
                info!(
                    "TELEM | t={}ms frame={} | CO={:.0}% CO2={:.0}% CH4={:.0}% | \
                     max={:.0}% tier={} alarm={}",
                    t.clock_ms,
                    t.frame,
                    co * 100.0,
                    co2 * 100.0,
                    ch4 * 100.0,
                    t.max_intensity * 100.0,
                    t.tier.label(),
                    if t.alarm_active { "ON" } else { "off" },
                );
            }
            AppEvent::TierChanged { from, to } => {
                info!("TIER  | {} -> {}", from.label(), to.label());
            }
            AppEvent::AlarmRaised { max_intensity } => {
                warn!("ALARM | raised, max={:.0}%", max_intensity * 100.0);
            }
            AppEvent::AlarmCleared => {
                info!("ALARM | cleared");
            }
            AppEvent::Started => {
                info!("START | simulator running");
            }
            AppEvent::Stopped { frames } => {
                info!("STOP  | {} frames evaluated", frames);
            }
        }
    }
}
