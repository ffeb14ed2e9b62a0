//! Interactive terminal surface.
//!
//! One adapter owns the terminal for both directions, so it implements
//! [`InputPort`] and [`PresentationPort`] together:
//!
//! - input: crossterm mouse and key events are drained without blocking
//!   once per frame, translated to [`InputEvent`]s, and applied to the
//!   slider group
//! - output: the circuit diagram is redrawn every frame with ratatui at the
//!   positions in [`crate::layout`]
//!
//! The terminal is put back in cooked mode on [`TerminalSurface::restore`]
//! or drop, whichever comes first.

use std::io;
use std::time::Duration;

use log::{error, info, warn};
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{DefaultTerminal, Frame};

use crate::app::ports::{FrameView, InputPort, PresentationPort};
use crate::config::SimConfig;
use crate::error::{DisplayError, Result};
use crate::input::slider::{DragState, SliderGroup};
use crate::input::{InputBatch, InputEvent, InputPoll, PointerEvent, PointerKind, apply_batch};
use crate::layout::{self, CellRect};
use crate::outputs::Palette;
use crate::severity::{CHANNEL_COUNT, CHANNEL_NAMES};

const HELP: &str = "drag: mouse | 1-3/Tab: select | \u{2190}/\u{2192}: adjust | 0: reset | q: quit";

pub struct TerminalSurface {
    terminal: DefaultTerminal,
    sliders: SliderGroup,
    restored: bool,
}

impl TerminalSurface {
    /// Enter raw mode and the alternate screen, and enable mouse capture.
    pub fn new(config: &SimConfig, initial: [f32; CHANNEL_COUNT]) -> Result<Self> {
        let terminal = ratatui::try_init().map_err(|e| {
            error!("Terminal init failed: {}", e);
            DisplayError::TerminalInit
        })?;
        if let Err(e) = execute!(io::stdout(), EnableMouseCapture) {
            error!("Mouse capture failed: {}", e);
            let _ = ratatui::try_restore();
            return Err(DisplayError::TerminalInit.into());
        }

        let mut sliders = SliderGroup::new(layout::SLIDERS, config.slider_step);
        for (idx, value) in initial.into_iter().enumerate() {
            sliders.set_value(idx, value);
        }
        info!("Terminal surface ready");

        Ok(Self {
            terminal,
            sliders,
            restored: false,
        })
    }

    /// Leave raw mode.  Idempotent.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
            warn!("Failed to release mouse capture: {}", e);
        }
        if let Err(e) = ratatui::try_restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        self.restore();
    }
}

impl InputPort for TerminalSurface {
    fn poll(&mut self) -> Result<InputPoll> {
        let mut batch = InputBatch::new();
        while !batch.is_full() {
            if !event::poll(Duration::ZERO).map_err(input_failed)? {
                break;
            }
            let ev = event::read().map_err(input_failed)?;
            if let Some(input) = translate_event(&ev) {
                let _ = batch.push(input);
            }
        }
        Ok(apply_batch(&mut self.sliders, &batch))
    }

    fn get_values(&self) -> [f32; CHANNEL_COUNT] {
        self.sliders.get_values()
    }
}

impl PresentationPort for TerminalSurface {
    fn present(&mut self, view: &FrameView) -> Result<()> {
        let sliders = &self.sliders;
        self.terminal
            .draw(|frame| render(frame, view, sliders))
            .map_err(|e| {
                error!("Draw failed: {}", e);
                DisplayError::DrawFailed
            })?;
        Ok(())
    }
}

fn input_failed(e: io::Error) -> DisplayError {
    error!("Input read failed: {}", e);
    DisplayError::InputFailed
}

// ───────────────────────────────────────────────────────────────
// Event translation
// ───────────────────────────────────────────────────────────────

pub(crate) fn translate_event(ev: &Event) -> Option<InputEvent> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(c @ '1'..='3') => Some(InputEvent::Select(c as usize - '1' as usize)),
        KeyCode::Char('0') => Some(InputEvent::ZeroAll),
        KeyCode::Tab => Some(InputEvent::SelectNext),
        KeyCode::Left => Some(InputEvent::Nudge(-1)),
        KeyCode::Right => Some(InputEvent::Nudge(1)),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent) -> Option<InputEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Press,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Release,
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerKind::Move,
        _ => return None,
    };
    Some(InputEvent::Pointer(PointerEvent::new(
        kind,
        mouse.column,
        mouse.row,
    )))
}

// ───────────────────────────────────────────────────────────────
// Rendering
// ───────────────────────────────────────────────────────────────

/// Lit indicators use their true colour; unlit ones stay dim grey since
/// black vanishes on a dark terminal.
fn palette_style(colour: Palette) -> Style {
    if !colour.is_lit() {
        return Style::new().fg(Color::DarkGray);
    }
    let (r, g, b) = colour.rgb();
    Style::new()
        .fg(Color::Rgb(r, g, b))
        .add_modifier(Modifier::BOLD)
}

fn rect(cell: CellRect) -> Rect {
    Rect::new(cell.x, cell.y, cell.width, cell.height)
}

/// Draw one line at `(x, y)`, clipped to the frame.
fn put(frame: &mut Frame, x: u16, y: u16, line: Line<'_>) {
    let target = Rect::new(x, y, line.width() as u16, 1).intersection(frame.area());
    if !target.is_empty() {
        frame.render_widget(line, target);
    }
}

fn indicator(frame: &mut Frame, cell: CellRect, title: &str, colour: Palette) {
    let target = rect(cell).intersection(frame.area());
    if target.is_empty() {
        return;
    }
    let style = palette_style(colour);
    let body = Paragraph::new(Line::styled(title, style))
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(style));
    frame.render_widget(body, target);
}

fn wire(frame: &mut Frame, from_x: u16, to_x: u16, y: u16, colour: Palette) {
    let len = usize::from(to_x.saturating_sub(from_x));
    put(
        frame,
        from_x,
        y,
        Line::styled("\u{2500}".repeat(len), palette_style(colour)),
    );
}

pub(crate) fn render(frame: &mut Frame, view: &FrameView, sliders: &SliderGroup) {
    let ind = &view.outputs.indicators;
    let dim = Style::new().fg(Color::Gray);

    let (ix, iy) = layout::INPUTS_LABEL;
    put(frame, ix, iy, Line::styled("INPUTS", dim));
    let (ox, oy) = layout::OUTPUTS_LABEL;
    put(frame, ox, oy, Line::styled("OUTPUTS", dim));

    // Inputs
    for (cell, title, colour) in [
        (layout::SENSOR_A, "SENSOR A", ind.sensor_a),
        (layout::SENSOR_B, "SENSOR B", ind.sensor_b),
    ] {
        indicator(frame, cell, title, colour);
        wire(frame, cell.right(), layout::CONTROLLER.x, cell.mid_row(), colour);
    }

    controller(frame, view);

    // Outputs
    for (i, (cell, colour)) in layout::LEDS.iter().zip(ind.leds).enumerate() {
        wire(frame, layout::CONTROLLER.right(), cell.x, cell.mid_row(), colour);
        indicator(frame, *cell, &format!("LED {}", i + 1), colour);
    }
    let alarm_colour = if view.outputs.alarm_active {
        Palette::Alert
    } else {
        Palette::Off
    };
    let alarm_title = if view.outputs.alarm_active {
        "ALARM \u{266a}"
    } else {
        "ALARM"
    };
    wire(
        frame,
        layout::CONTROLLER.right(),
        layout::ALARM.x,
        layout::ALARM.mid_row(),
        alarm_colour,
    );
    indicator(frame, layout::ALARM, alarm_title, alarm_colour);

    slider_rows(frame, sliders);
    put(frame, 1, layout::HELP_ROW, Line::styled(HELP, dim));
}

fn controller(frame: &mut Frame, view: &FrameView) {
    let target = rect(layout::CONTROLLER).intersection(frame.area());
    if target.is_empty() {
        return;
    }
    let peak = view.intensities.iter().copied().fold(0.0_f32, f32::max);
    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("status  {}", view.tier.label())),
        Line::raw(format!("max     {:.0}%", peak * 100.0)),
        Line::from(vec![
            Span::raw("alarm   "),
            if view.outputs.alarm_active {
                Span::styled("ON", palette_style(Palette::Alert))
            } else {
                Span::raw("off")
            },
        ]),
        Line::raw(""),
    ];
    for (name, value) in CHANNEL_NAMES.iter().zip(view.intensities) {
        lines.push(Line::raw(format!("{:<6}{:>4.0}%", name, value * 100.0)));
    }
    let body = Paragraph::new(lines).block(
        Block::bordered()
            .title(" CONTROLLER ")
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(body, target);
}

fn slider_rows(frame: &mut Frame, sliders: &SliderGroup) {
    let geometry = *sliders.geometry();
    for (idx, name) in CHANNEL_NAMES.iter().enumerate() {
        let row = sliders.row(idx);
        let selected = sliders.selected() == idx;
        let handle = sliders.handle_x(idx) - geometry.x;

        let track = if selected {
            Style::new().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::Gray)
        };
        let knob = match sliders.drag_state(idx) {
            DragState::Dragging => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            DragState::Idle => Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        };

        if selected {
            put(frame, layout::SLIDER_NAME_X - 2, row, Line::styled("\u{25b6}", track));
        }
        put(frame, layout::SLIDER_NAME_X, row, Line::styled(*name, track));
        put(
            frame,
            geometry.x,
            row,
            Line::from(vec![
                Span::styled("\u{2500}".repeat(usize::from(handle)), track),
                Span::styled("\u{25cf}", knob),
                Span::styled(
                    "\u{2500}".repeat(usize::from(geometry.width.saturating_sub(handle))),
                    track,
                ),
            ]),
        );
        put(
            frame,
            layout::SLIDER_READOUT_X,
            row,
            Line::raw(sliders.label(idx)),
        );
    }
}
