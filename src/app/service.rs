//! Application service: the hexagonal core.
//!
//! [`AppService`] turns one input snapshot into one frame of outputs.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!                 ┌────────────────────────┐ ──▶ PresentationPort
//!  [f32; 3] ────▶ │       AppService        │ ──▶ TonePort
//!  clock_ms ────▶ │  classify · map_outputs │ ──▶ EventSink
//!                 └────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::SimConfig;
use crate::error::Result;
use crate::outputs::{FrameOutputs, map_outputs};
use crate::severity::{CHANNEL_COUNT, SeverityTier, clamp_intensity, classify, max_intensity};

use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, FrameView, PresentationPort, TonePort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// Orchestrates classify → map → present → tone for each frame.
///
/// The previous frame's tier and alarm flag are kept only to detect edges
/// for [`AppEvent`]s.  They never feed back into the outputs.
pub struct AppService {
    telemetry_interval_ms: u64,
    frame_count: u64,
    last_tier: Option<SeverityTier>,
    last_alarm: bool,
    next_telemetry_ms: u64,
}

impl AppService {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            telemetry_interval_ms: config.telemetry_interval_ms,
            frame_count: 0,
            last_tier: None,
            last_alarm: false,
            next_telemetry_ms: config.telemetry_interval_ms,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("AppService started");
    }

    /// Silence the tone and report the frame count.  Safe to call twice.
    pub fn stop(&mut self, tone: &mut impl TonePort, sink: &mut impl EventSink) {
        tone.stop_tone();
        sink.emit(&AppEvent::Stopped {
            frames: self.frame_count,
        });
        info!("AppService stopped after {} frames", self.frame_count);
    }

    // ── Per-frame orchestration ───────────────────────────────

    /// Run one frame: classify → map → present → drive tone → emit edges.
    ///
    /// The tone port is driven every frame with the frame's alarm flag,
    /// whether or not it changed.
    pub fn tick(
        &mut self,
        values: [f32; CHANNEL_COUNT],
        clock_ms: u64,
        display: &mut impl PresentationPort,
        tone: &mut impl TonePort,
        sink: &mut impl EventSink,
    ) -> Result<FrameOutputs> {
        self.frame_count += 1;

        // 1. Classify the snapshot
        let intensities = values.map(clamp_intensity);
        let peak = max_intensity(&intensities);
        let tier = classify(peak);

        // 2. Map to indicator colours + alarm flag
        let outputs = map_outputs(tier, clock_ms);

        // 3. Present
        display.present(&FrameView {
            clock_ms,
            intensities,
            tier,
            outputs,
        })?;

        // 4. Tone follows the alarm flag unconditionally
        if outputs.alarm_active {
            tone.start_continuous_tone();
        } else {
            tone.stop_tone();
        }

        // 5. Edge events
        self.emit_edges(tier, outputs.alarm_active, peak, sink);
        self.emit_telemetry_if_due(clock_ms, intensities, peak, tier, outputs, sink);

        Ok(outputs)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Frames evaluated since construction.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_edges(
        &mut self,
        tier: SeverityTier,
        alarm: bool,
        peak: f32,
        sink: &mut impl EventSink,
    ) {
        if let Some(prev) = self.last_tier.filter(|&prev| prev != tier) {
            debug!("tier {:?} -> {:?} (max={:.2})", prev, tier, peak);
            sink.emit(&AppEvent::TierChanged { from: prev, to: tier });
        }
        self.last_tier = Some(tier);

        match (self.last_alarm, alarm) {
            (false, true) => sink.emit(&AppEvent::AlarmRaised {
                max_intensity: peak,
            }),
            (true, false) => sink.emit(&AppEvent::AlarmCleared),
            _ => {}
        }
        self.last_alarm = alarm;
    }

    fn emit_telemetry_if_due(
        &mut self,
        clock_ms: u64,
        intensities: [f32; CHANNEL_COUNT],
        peak: f32,
        tier: SeverityTier,
        outputs: FrameOutputs,
        sink: &mut impl EventSink,
    ) {
        if self.telemetry_interval_ms == 0 || clock_ms < self.next_telemetry_ms {
            return;
        }
        // Skip missed intervals rather than bursting after a stall.
        self.next_telemetry_ms = clock_ms - clock_ms % self.telemetry_interval_ms
            + self.telemetry_interval_ms;
        sink.emit(&AppEvent::Telemetry(TelemetryData {
            clock_ms,
            frame: self.frame_count,
            intensities,
            max_intensity: peak,
            tier,
            alarm_active: outputs.alarm_active,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::Palette;

    #[derive(Default)]
    struct Recorder {
        views: Vec<FrameView>,
        tone_calls: Vec<bool>,
        playing: bool,
        events: Vec<AppEvent>,
    }

    impl PresentationPort for Recorder {
        fn present(&mut self, view: &FrameView) -> Result<()> {
            self.views.push(*view);
            Ok(())
        }
    }

    impl TonePort for Recorder {
        fn start_continuous_tone(&mut self) {
            self.tone_calls.push(true);
            self.playing = true;
        }
        fn stop_tone(&mut self) {
            self.tone_calls.push(false);
            self.playing = false;
        }
        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    impl EventSink for Recorder {
        fn emit(&mut self, event: &AppEvent) {
            self.events.push(event.clone());
        }
    }

    fn run(app: &mut AppService, rec: &mut Recorder, values: [f32; 3], clock: u64) -> FrameOutputs {
        let mut display = Recorder::default();
        let mut sink = Recorder::default();
        let out = app.tick(values, clock, &mut display, rec, &mut sink).unwrap();
        rec.views.extend(display.views);
        rec.events.extend(sink.events);
        out
    }

    #[test]
    fn tone_driven_every_frame() {
        let mut app = AppService::new(&SimConfig::default());
        let mut rec = Recorder::default();
        run(&mut app, &mut rec, [0.1, 0.0, 0.0], 0);
        run(&mut app, &mut rec, [0.1, 0.0, 0.0], 16);
        run(&mut app, &mut rec, [0.9, 0.0, 0.0], 32);
        run(&mut app, &mut rec, [0.9, 0.0, 0.0], 48);
        assert_eq!(rec.tone_calls, vec![false, false, true, true]);
        assert!(rec.playing);
    }

    #[test]
    fn view_carries_clamped_intensities() {
        let mut app = AppService::new(&SimConfig::default());
        let mut rec = Recorder::default();
        run(&mut app, &mut rec, [-1.0, 2.0, f32::NAN], 0);
        let view = rec.views[0];
        assert_eq!(view.intensities, [0.0, 1.0, 0.0]);
        assert_eq!(view.tier, SeverityTier::Critical);
        assert_eq!(view.outputs.indicators.leds[3], Palette::Alert);
    }

    #[test]
    fn events_only_on_edges() {
        let mut app = AppService::new(&SimConfig::default());
        let mut rec = Recorder::default();
        run(&mut app, &mut rec, [0.1, 0.0, 0.0], 0);
        run(&mut app, &mut rec, [0.1, 0.0, 0.0], 16);
        assert!(rec.events.is_empty());

        run(&mut app, &mut rec, [0.3, 0.0, 0.0], 32);
        run(&mut app, &mut rec, [0.95, 0.0, 0.0], 48);
        run(&mut app, &mut rec, [0.95, 0.0, 0.0], 64);
        run(&mut app, &mut rec, [0.0, 0.0, 0.0], 80);

        assert_eq!(
            rec.events,
            vec![
                AppEvent::TierChanged {
                    from: SeverityTier::Clean,
                    to: SeverityTier::Moderate
                },
                AppEvent::TierChanged {
                    from: SeverityTier::Moderate,
                    to: SeverityTier::Critical
                },
                AppEvent::AlarmRaised {
                    max_intensity: 0.95
                },
                AppEvent::TierChanged {
                    from: SeverityTier::Critical,
                    to: SeverityTier::Clean
                },
                AppEvent::AlarmCleared,
            ]
        );
    }

    #[test]
    fn telemetry_at_interval() {
        let config = SimConfig {
            telemetry_interval_ms: 1000,
            ..SimConfig::default()
        };
        let mut app = AppService::new(&config);
        let mut rec = Recorder::default();
        for clock in (0..=3500).step_by(250) {
            run(&mut app, &mut rec, [0.0; 3], clock);
        }
        let stamps: Vec<u64> = rec
            .events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Telemetry(t) => Some(t.clock_ms),
                _ => None,
            })
            .collect();
        assert_eq!(stamps, vec![1000, 2000, 3000]);
    }

    #[test]
    fn telemetry_disabled_with_zero_interval() {
        let config = SimConfig {
            telemetry_interval_ms: 0,
            ..SimConfig::default()
        };
        let mut app = AppService::new(&config);
        let mut rec = Recorder::default();
        for clock in (0..10_000).step_by(500) {
            run(&mut app, &mut rec, [0.0; 3], clock);
        }
        assert!(rec.events.is_empty());
    }

    #[test]
    fn stop_silences_tone_and_reports_frames() {
        let mut app = AppService::new(&SimConfig::default());
        let mut rec = Recorder::default();
        run(&mut app, &mut rec, [0.9, 0.9, 0.9], 0);
        assert!(rec.playing);

        let mut sink = Recorder::default();
        app.stop(&mut rec, &mut sink);
        assert!(!rec.playing);
        assert_eq!(sink.events, vec![AppEvent::Stopped { frames: 1 }]);
        assert_eq!(app.frame_count(), 1);
    }
}
