//! Mock adapters for integration tests.
//!
//! Records every presented frame and every tone call so tests can assert on
//! the full history without a terminal or sound card.

use std::cell::Cell;

use alarmsim::app::events::AppEvent;
use alarmsim::app::ports::{ClockPort, EventSink, FrameView, InputPort, PresentationPort, TonePort};
use alarmsim::error::{DisplayError, Result};
use alarmsim::input::InputPoll;

// ── MockSurface ───────────────────────────────────────────────

/// Scripted input plus a record of presented frames.
pub struct MockSurface {
    /// Values returned for frame `i`; the last entry repeats.
    pub values: Vec<[f32; 3]>,
    /// Request quit on this poll (0-based), if set.
    pub quit_on_poll: Option<usize>,
    /// Fail `present` on this frame (0-based), if set.
    pub fail_on_frame: Option<usize>,
    pub polls: usize,
    pub views: Vec<FrameView>,
}

#[allow(dead_code)]
impl MockSurface {
    pub fn new(values: Vec<[f32; 3]>) -> Self {
        Self {
            values,
            quit_on_poll: None,
            fail_on_frame: None,
            polls: 0,
            views: Vec::new(),
        }
    }

    pub fn quit_on(mut self, poll: usize) -> Self {
        self.quit_on_poll = Some(poll);
        self
    }

    pub fn fail_on(mut self, frame: usize) -> Self {
        self.fail_on_frame = Some(frame);
        self
    }
}

impl InputPort for MockSurface {
    fn poll(&mut self) -> Result<InputPoll> {
        let n = self.polls;
        self.polls += 1;
        if self.quit_on_poll == Some(n) {
            Ok(InputPoll::Quit)
        } else {
            Ok(InputPoll::Continue)
        }
    }

    fn get_values(&self) -> [f32; 3] {
        let idx = self.views.len().min(self.values.len().saturating_sub(1));
        self.values.get(idx).copied().unwrap_or([0.0; 3])
    }
}

impl PresentationPort for MockSurface {
    fn present(&mut self, view: &FrameView) -> Result<()> {
        if self.fail_on_frame == Some(self.views.len()) {
            return Err(DisplayError::DrawFailed.into());
        }
        self.views.push(*view);
        Ok(())
    }
}

// ── MockTone ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCall {
    Start,
    Stop,
}

#[derive(Default)]
pub struct MockTone {
    pub calls: Vec<ToneCall>,
    playing: bool,
}

impl TonePort for MockTone {
    fn start_continuous_tone(&mut self) {
        self.calls.push(ToneCall::Start);
        self.playing = true;
    }

    fn stop_tone(&mut self) {
        self.calls.push(ToneCall::Stop);
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Advances by a fixed step on every read.
pub struct ManualClock {
    now: Cell<u64>,
    step_ms: u64,
}

impl ManualClock {
    pub fn stepping(step_ms: u64) -> Self {
        Self {
            now: Cell::new(0),
            step_ms,
        }
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.step_ms);
        t
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
