//! Scripted, non-interactive surface.
//!
//! Replays a list of channel snapshots, each held for a number of frames,
//! and writes one JSON line per frame whose outputs differ from the last
//! line written (the first frame always writes).  When the script runs out
//! the surface requests quit.
//!
//! ```text
//! {"clock_ms":0,"intensities":[0.9,0.0,0.0],"tier":"critical",
//!  "indicators":{"sensor_a":"warning",...},"alarm_active":true}
//! ```

use std::io::Write;

use log::{debug, error};

use crate::app::ports::{FrameView, InputPort, PresentationPort};
use crate::error::{DisplayError, Error, Result};
use crate::input::InputPoll;
use crate::outputs::FrameOutputs;
use crate::severity::{CHANNEL_COUNT, SeverityTier, clamp_intensity};

/// One snapshot of channel values held for `frames` frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub values: [f32; CHANNEL_COUNT],
    pub frames: u64,
}

impl ScriptStep {
    pub fn new(values: [f32; CHANNEL_COUNT], frames: u64) -> Self {
        Self {
            values: values.map(clamp_intensity),
            frames,
        }
    }
}

/// Parse `"CO,CO2,CH4"`, e.g. `"0.1,0.85,0"`.  Values outside `[0, 1]` are
/// clamped.
pub fn parse_channel_values(text: &str) -> Result<[f32; CHANNEL_COUNT]> {
    let mut values = [0.0; CHANNEL_COUNT];
    let mut parts = text.split(',');
    for slot in values.iter_mut() {
        let part = parts
            .next()
            .ok_or(Error::Config("expected three comma-separated values"))?;
        let v: f32 = part
            .trim()
            .parse()
            .map_err(|_| Error::Config("channel value is not a number"))?;
        *slot = clamp_intensity(v);
    }
    if parts.next().is_some() {
        return Err(Error::Config("expected three comma-separated values"));
    }
    Ok(values)
}

pub struct HeadlessSurface<W: Write> {
    script: Vec<ScriptStep>,
    step: usize,
    frames_in_step: u64,
    current: [f32; CHANNEL_COUNT],
    out: W,
    last: Option<(SeverityTier, FrameOutputs)>,
    lines_written: u64,
}

impl<W: Write> HeadlessSurface<W> {
    pub fn new(script: Vec<ScriptStep>, out: W) -> Self {
        Self {
            script,
            step: 0,
            frames_in_step: 0,
            current: [0.0; CHANNEL_COUNT],
            out,
            last: None,
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> InputPort for HeadlessSurface<W> {
    fn poll(&mut self) -> Result<InputPoll> {
        while let Some(step) = self.script.get(self.step) {
            if self.frames_in_step < step.frames {
                if self.frames_in_step == 0 {
                    debug!("script step {}: {:?}", self.step, step.values);
                }
                self.frames_in_step += 1;
                self.current = step.values;
                return Ok(InputPoll::Continue);
            }
            self.step += 1;
            self.frames_in_step = 0;
        }
        Ok(InputPoll::Quit)
    }

    fn get_values(&self) -> [f32; CHANNEL_COUNT] {
        self.current
    }
}

impl<W: Write> PresentationPort for HeadlessSurface<W> {
    fn present(&mut self, view: &FrameView) -> Result<()> {
        let key = (view.tier, view.outputs);
        if self.last == Some(key) {
            return Ok(());
        }
        self.last = Some(key);

        serde_json::to_writer(&mut self.out, view).map_err(|e| {
            error!("Frame encode failed: {}", e);
            DisplayError::WriteFailed
        })?;
        writeln!(self.out)
            .and_then(|()| self.out.flush())
            .map_err(|e| {
                error!("Frame write failed: {}", e);
                DisplayError::WriteFailed
            })?;
        self.lines_written += 1;
        Ok(())
    }
}
