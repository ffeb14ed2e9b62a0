//! Fixed-tick frame loop.
//!
//! ```text
//!  ┌──────────── once per frame (60 Hz) ─────────────┐
//!  │ poll input ─▶ quit? ─▶ get_values ─▶ now_ms      │
//!  │      ─▶ AppService::tick ─▶ FramePacer::wait     │
//!  └─────────────────────────────────────────────────┘
//! ```
//!
//! The loop never blocks on anything but the pacer.  On quit, or on any
//! port error, the tone is stopped before control leaves [`Simulator::run`].

use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::app::ports::{ClockPort, EventSink, InputPort, PresentationPort, TonePort};
use crate::app::service::AppService;
use crate::config::SimConfig;
use crate::error::Result;
use crate::input::InputPoll;

// ───────────────────────────────────────────────────────────────
// Frame pacing
// ───────────────────────────────────────────────────────────────

/// Sleeps until the next frame deadline.
///
/// Deadlines advance by a fixed period.  When a frame overruns by more than
/// one period the schedule resynchronises to "now" instead of racing to
/// catch up.
pub struct FramePacer {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / tick_rate_hz.max(1),
            next_deadline: None,
        }
    }

    /// A pacer that never sleeps (tests, batch runs).
    pub fn unpaced() -> Self {
        Self {
            period: Duration::ZERO,
            next_deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn wait(&mut self) {
        if self.period.is_zero() {
            return;
        }
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now + self.period);
        if deadline > now {
            thread::sleep(deadline - now);
            self.next_deadline = Some(deadline + self.period);
        } else if now - deadline > self.period {
            self.next_deadline = Some(now + self.period);
        } else {
            self.next_deadline = Some(deadline + self.period);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Simulator
// ───────────────────────────────────────────────────────────────

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The input surface reported a quit request.
    Quit,
    /// The configured frame budget ran out.
    FrameBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub reason: StopReason,
}

/// Owns the service and pacer; borrows every adapter for the run.
pub struct Simulator {
    service: AppService,
    pacer: FramePacer,
    max_frames: Option<u64>,
}

impl Simulator {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            service: AppService::new(config),
            pacer: FramePacer::new(config.tick_rate_hz),
            max_frames: None,
        }
    }

    /// Replace the pacer (e.g. with [`FramePacer::unpaced`]).
    pub fn with_pacer(mut self, pacer: FramePacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Stop after `frames` evaluations even without a quit request.
    pub fn with_frame_budget(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn service(&self) -> &AppService {
        &self.service
    }

    /// Run until quit or frame budget.
    ///
    /// `surface` satisfies **both** [`InputPort`] and [`PresentationPort`]:
    /// a terminal owns its input and output together.
    pub fn run(
        &mut self,
        surface: &mut (impl InputPort + PresentationPort),
        tone: &mut impl TonePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<RunSummary> {
        self.service.start(sink);
        info!("Frame loop running at {:?}/frame", self.pacer.period());

        let result = self.run_frames(surface, tone, clock, sink);

        // Every exit path silences the tone, including errors.
        self.service.stop(tone, sink);
        if let Err(e) = &result {
            warn!("Frame loop aborted: {}", e);
        }
        result
    }

    fn run_frames(
        &mut self,
        surface: &mut (impl InputPort + PresentationPort),
        tone: &mut impl TonePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<RunSummary> {
        loop {
            if self.budget_spent() {
                return Ok(self.summary(StopReason::FrameBudget));
            }
            if let InputPoll::Quit = surface.poll()? {
                info!("Quit requested");
                return Ok(self.summary(StopReason::Quit));
            }

            let values = surface.get_values();
            let now = clock.now_ms();
            self.service.tick(values, now, surface, tone, sink)?;

            if !self.budget_spent() {
                self.pacer.wait();
            }
        }
    }

    fn budget_spent(&self) -> bool {
        self.max_frames.is_some_and(|max| self.service.frame_count() >= max)
    }

    fn summary(&self, reason: StopReason) -> RunSummary {
        RunSummary {
            frames: self.service.frame_count(),
            reason,
        }
    }
}
