//! Input surface: pointer/keyboard events and the slider group they drive.
//!
//! Adapters translate backend events (crossterm mouse and key events, a
//! scripted run) into the backend-neutral [`InputEvent`] type and feed them
//! to a [`slider::SliderGroup`].

pub mod slider;

/// Maximum number of input events consumed in one frame.
/// Anything beyond this is left for the next frame.
pub const MAX_EVENTS_PER_FRAME: usize = 32;

/// Fixed-capacity batch of events gathered during one frame.
pub type InputBatch = heapless::Vec<InputEvent, MAX_EVENTS_PER_FRAME>;

/// Pointer gesture phase, in surface cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: u16,
    pub y: u16,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }
}

/// Backend-neutral input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// Move the selected slider by a signed number of steps.
    Nudge(i8),
    /// Select a channel for keyboard nudging.
    Select(usize),
    /// Cycle the keyboard selection to the next channel.
    SelectNext,
    /// Reset every channel to zero.
    ZeroAll,
    /// Window close / quit key.
    Quit,
}

/// Result of polling the input surface once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPoll {
    Continue,
    Quit,
}

/// Feed one frame's batch to the sliders, in arrival order.
///
/// Events after a `Quit` are still applied; the quit wins regardless.
pub fn apply_batch(sliders: &mut slider::SliderGroup, batch: &[InputEvent]) -> InputPoll {
    let mut poll = InputPoll::Continue;
    for event in batch {
        if let InputEvent::Quit = event {
            poll = InputPoll::Quit;
        }
        sliders.apply(event);
    }
    poll
}

#[cfg(test)]
mod tests {
    use super::slider::{SliderGeometry, SliderGroup};
    use super::*;

    #[test]
    fn batch_applies_in_order() {
        let mut sliders = SliderGroup::new(SliderGeometry::default(), 0.1);
        let mut batch = InputBatch::new();
        batch.push(InputEvent::Select(1)).unwrap();
        batch.push(InputEvent::Nudge(3)).unwrap();
        batch.push(InputEvent::Nudge(-1)).unwrap();
        assert_eq!(apply_batch(&mut sliders, &batch), InputPoll::Continue);
        assert!((sliders.value(1) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn quit_anywhere_in_batch_wins() {
        let mut sliders = SliderGroup::new(SliderGeometry::default(), 0.1);
        let batch = [InputEvent::Quit, InputEvent::Nudge(1)];
        assert_eq!(apply_batch(&mut sliders, &batch), InputPoll::Quit);
        assert!((sliders.value(0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn batch_capacity_is_bounded() {
        let mut batch = InputBatch::new();
        for _ in 0..MAX_EVENTS_PER_FRAME {
            batch.push(InputEvent::ZeroAll).unwrap();
        }
        assert!(batch.push(InputEvent::ZeroAll).is_err());
    }
}
