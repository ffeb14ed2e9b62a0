//! Frame loop lifecycle: quit, frame budget, error paths.

use alarmsim::app::events::AppEvent;
use alarmsim::config::SimConfig;
use alarmsim::error::{DisplayError, Error};
use alarmsim::runtime::{FramePacer, Simulator, StopReason};

use crate::mock_surface::{ManualClock, MockSurface, MockTone, RecordingSink, ToneCall};

fn simulator() -> Simulator {
    Simulator::new(&SimConfig::default()).with_pacer(FramePacer::unpaced())
}

#[test]
fn quit_on_first_poll_runs_no_frames() {
    let mut surface = MockSurface::new(vec![[0.9, 0.0, 0.0]]).quit_on(0);
    let mut tone = MockTone::default();
    let mut sink = RecordingSink::default();

    let summary = simulator()
        .run(&mut surface, &mut tone, &ManualClock::stepping(16), &mut sink)
        .unwrap();

    assert_eq!(summary.frames, 0);
    assert_eq!(summary.reason, StopReason::Quit);
    assert!(surface.views.is_empty());
    assert_eq!(tone.calls, vec![ToneCall::Stop]);
    assert_eq!(
        sink.events,
        vec![AppEvent::Started, AppEvent::Stopped { frames: 0 }]
    );
}

#[test]
fn quit_during_alarm_stops_tone() {
    let mut surface = MockSurface::new(vec![[0.95, 0.0, 0.0]]).quit_on(5);
    let mut tone = MockTone::default();
    let mut sink = RecordingSink::default();

    let summary = simulator()
        .run(&mut surface, &mut tone, &ManualClock::stepping(16), &mut sink)
        .unwrap();

    assert_eq!(summary.frames, 5);
    assert_eq!(surface.views.len(), 5);
    assert_eq!(tone.calls.last(), Some(&ToneCall::Stop));
    assert_eq!(
        tone.calls.iter().filter(|c| **c == ToneCall::Start).count(),
        5
    );
    assert!(matches!(sink.events.last(), Some(AppEvent::Stopped { frames: 5 })));
}

#[test]
fn frame_budget_ends_run() {
    let mut surface = MockSurface::new(vec![[0.0; 3]]);
    let mut tone = MockTone::default();
    let mut sink = RecordingSink::default();

    let mut sim = simulator().with_frame_budget(12);
    let summary = sim
        .run(&mut surface, &mut tone, &ManualClock::stepping(16), &mut sink)
        .unwrap();

    assert_eq!(summary.frames, 12);
    assert_eq!(summary.reason, StopReason::FrameBudget);
    assert_eq!(sim.service().frame_count(), 12);
    assert_eq!(surface.polls, 12);
}

#[test]
fn zero_frame_budget_runs_nothing() {
    let mut surface = MockSurface::new(vec![[0.9, 0.0, 0.0]]);
    let mut tone = MockTone::default();
    let mut sink = RecordingSink::default();

    let summary = simulator()
        .with_frame_budget(0)
        .run(&mut surface, &mut tone, &ManualClock::stepping(16), &mut sink)
        .unwrap();

    assert_eq!(summary.frames, 0);
    assert_eq!(summary.reason, StopReason::FrameBudget);
    assert_eq!(surface.polls, 0);
    assert!(surface.views.is_empty());
    assert!(!tone.calls.contains(&ToneCall::Start));
}

#[test]
fn present_error_propagates_and_stops_tone() {
    let mut surface = MockSurface::new(vec![[0.9, 0.9, 0.9]]).fail_on(3);
    let mut tone = MockTone::default();
    let mut sink = RecordingSink::default();

    let err = simulator()
        .run(&mut surface, &mut tone, &ManualClock::stepping(16), &mut sink)
        .unwrap_err();

    assert_eq!(err, Error::Display(DisplayError::DrawFailed));
    assert_eq!(surface.views.len(), 3);
    assert_eq!(tone.calls.last(), Some(&ToneCall::Stop));
    assert!(matches!(sink.events.last(), Some(AppEvent::Stopped { .. })));
}

#[test]
fn tone_follows_alarm_every_frame() {
    let mut surface = MockSurface::new(vec![
        [0.1, 0.0, 0.0],
        [0.9, 0.0, 0.0],
        [0.9, 0.0, 0.0],
        [0.5, 0.0, 0.0],
    ]);
    let mut tone = MockTone::default();
    let mut sink = RecordingSink::default();

    simulator()
        .with_frame_budget(4)
        .run(&mut surface, &mut tone, &ManualClock::stepping(16), &mut sink)
        .unwrap();

    use ToneCall::{Start, Stop};
    // Four frames, then the shutdown stop.
    assert_eq!(tone.calls, vec![Stop, Start, Start, Stop, Stop]);
}
