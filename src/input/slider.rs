//! Draggable horizontal sliders emulating the three gas sensor readings.
//!
//! Each slider runs its own two-state interaction machine:
//!
//! ```text
//!          press within tolerance of handle
//!   IDLE ─────────────────────────────────▶ DRAGGING
//!    ▲                                         │
//!    └──────────────── release ────────────────┘
//! ```
//!
//! While dragging, pointer moves set the value from the pointer column,
//! clamped to the track.  A release anywhere ends every drag.

use log::debug;

use super::{InputEvent, PointerEvent, PointerKind};
use crate::severity::{CHANNEL_COUNT, CHANNEL_NAMES, clamp_intensity};

/// Interaction state of one slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Placement of the slider group on the surface, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderGeometry {
    /// Column of the track's left end (value 0.0).
    pub x: u16,
    /// Row of the first slider.
    pub y_start: u16,
    /// Track width; the handle spans columns `x..=x + width`.
    pub width: u16,
    /// Rows between consecutive sliders.
    pub gap: u16,
    /// How many columns either side of the handle a press still grabs it.
    pub handle_tolerance: u16,
}

impl Default for SliderGeometry {
    fn default() -> Self {
        crate::layout::SLIDERS
    }
}

/// Three sliders sharing one geometry.
#[derive(Debug, Clone)]
pub struct SliderGroup {
    geometry: SliderGeometry,
    values: [f32; CHANNEL_COUNT],
    drag: [DragState; CHANNEL_COUNT],
    selected: usize,
    step: f32,
}

impl SliderGroup {
    pub fn new(geometry: SliderGeometry, step: f32) -> Self {
        Self {
            geometry,
            values: [0.0; CHANNEL_COUNT],
            drag: [DragState::Idle; CHANNEL_COUNT],
            selected: 0,
            step,
        }
    }

    pub fn geometry(&self) -> &SliderGeometry {
        &self.geometry
    }

    /// Snapshot of all channel values, each in `[0, 1]`.
    pub fn get_values(&self) -> [f32; CHANNEL_COUNT] {
        self.values
    }

    pub fn value(&self, idx: usize) -> f32 {
        self.values[idx]
    }

    pub fn set_value(&mut self, idx: usize, value: f32) {
        if idx < CHANNEL_COUNT {
            self.values[idx] = clamp_intensity(value);
        }
    }

    /// Shift a channel by `steps` keyboard steps, clamped to `[0, 1]`.
    pub fn nudge(&mut self, idx: usize, steps: i8) {
        if idx < CHANNEL_COUNT {
            let v = self.values[idx] + f32::from(steps) * self.step;
            self.set_value(idx, v);
        }
    }

    pub fn drag_state(&self, idx: usize) -> DragState {
        self.drag[idx]
    }

    /// Channel currently targeted by keyboard nudges.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Row occupied by slider `idx`.
    pub fn row(&self, idx: usize) -> u16 {
        self.geometry.y_start + idx as u16 * self.geometry.gap
    }

    /// Column of slider `idx`'s handle.
    pub fn handle_x(&self, idx: usize) -> u16 {
        self.geometry.x + (self.values[idx] * f32::from(self.geometry.width)) as u16
    }

    pub fn label(&self, idx: usize) -> String {
        format!("{}: {}%", CHANNEL_NAMES[idx], (self.values[idx] * 100.0) as u32)
    }

    /// Apply one input event.  `Quit` is not a slider concern and is ignored.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Pointer(p) => self.handle_pointer(p),
            InputEvent::Nudge(steps) => self.nudge(self.selected, steps),
            InputEvent::Select(idx) if idx < CHANNEL_COUNT => self.selected = idx,
            InputEvent::Select(_) => {}
            InputEvent::SelectNext => self.selected = (self.selected + 1) % CHANNEL_COUNT,
            InputEvent::ZeroAll => self.values = [0.0; CHANNEL_COUNT],
            InputEvent::Quit => {}
        }
    }

    /// Drive the per-slider drag machines from one pointer event.
    pub fn handle_pointer(&mut self, ev: PointerEvent) {
        match ev.kind {
            PointerKind::Press => {
                for idx in 0..CHANNEL_COUNT {
                    if self.hits_handle(idx, ev.x, ev.y) {
                        debug!("slider {} grabbed at x={}", CHANNEL_NAMES[idx], ev.x);
                        self.drag[idx] = DragState::Dragging;
                        self.selected = idx;
                    }
                }
            }
            PointerKind::Release => {
                self.drag = [DragState::Idle; CHANNEL_COUNT];
            }
            PointerKind::Move => {
                for idx in 0..CHANNEL_COUNT {
                    if self.drag[idx] == DragState::Dragging {
                        self.values[idx] = self.value_at(ev.x);
                    }
                }
            }
        }
    }

    fn hits_handle(&self, idx: usize, x: u16, y: u16) -> bool {
        y == self.row(idx) && x.abs_diff(self.handle_x(idx)) <= self.geometry.handle_tolerance
    }

    fn value_at(&self, x: u16) -> f32 {
        let width = self.geometry.width.max(1);
        let rel = x.saturating_sub(self.geometry.x).min(width);
        f32::from(rel) / f32::from(width)
    }
}
