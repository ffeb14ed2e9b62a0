//! End-to-end frames through the loop with a manual clock.

use alarmsim::config::SimConfig;
use alarmsim::outputs::Palette::{Alert, Off, Safe};
use alarmsim::runtime::{FramePacer, Simulator};
use alarmsim::severity::SeverityTier;

use crate::mock_surface::{ManualClock, MockSurface, MockTone, RecordingSink};

fn run_frames(values: [f32; 3], frames: u64, step_ms: u64) -> (MockSurface, MockTone) {
    let mut surface = MockSurface::new(vec![values]);
    let mut tone = MockTone::default();
    let mut sink = RecordingSink::default();
    Simulator::new(&SimConfig::default())
        .with_pacer(FramePacer::unpaced())
        .with_frame_budget(frames)
        .run(&mut surface, &mut tone, &ManualClock::stepping(step_ms), &mut sink)
        .unwrap();
    (surface, tone)
}

#[test]
fn low_reading_is_clean() {
    let (surface, _) = run_frames([0.1, 0.0, 0.0], 1, 16);
    let view = surface.views[0];
    assert_eq!(view.tier, SeverityTier::Clean);
    let ind = view.outputs.indicators;
    assert_eq!((ind.sensor_a, ind.sensor_b), (Off, Off));
    assert_eq!(ind.leds, [Safe, Off, Off, Off]);
    assert!(!view.outputs.alarm_active);
}

#[test]
fn critical_reading_blinks_at_5hz() {
    // Clock reads 0, 50, 100, 150, ...
    let (surface, tone) = run_frames([0.3, 0.9, 0.1], 8, 50);
    let led4: Vec<_> = surface
        .views
        .iter()
        .map(|v| v.outputs.indicators.leds[3])
        .collect();
    assert_eq!(led4, vec![Alert, Alert, Off, Off, Alert, Alert, Off, Off]);

    for view in &surface.views {
        assert_eq!(view.tier, SeverityTier::Critical);
        assert!(view.outputs.alarm_active);
        assert_eq!(view.outputs.indicators.leds[..3], [Off, Off, Off]);
    }
    // Alarm never drops during the off half of a blink.
    assert!(tone.calls[..8].iter().all(|c| *c == crate::mock_surface::ToneCall::Start));
}

#[test]
fn clock_at_50_and_150() {
    let (surface, _) = run_frames([0.3, 0.9, 0.1], 4, 50);
    let at = |ms: u64| {
        surface
            .views
            .iter()
            .find(|v| v.clock_ms == ms)
            .copied()
            .unwrap()
    };
    assert_eq!(at(50).outputs.indicators.leds[3], Alert);
    assert!(at(50).outputs.alarm_active);
    assert_eq!(at(150).outputs.indicators.leds[3], Off);
    assert!(at(150).outputs.alarm_active);
}
