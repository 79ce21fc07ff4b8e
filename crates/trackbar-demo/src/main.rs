#![forbid(unsafe_code)]

//! Terminal demo adapter for the trackbar engine.
//!
//! Renders a two-handle slider on one terminal row and translates crossterm
//! mouse events into the engine's pointer contract: press on a handle starts
//! a drag, press on the track body is a click-to-move, a right-button press
//! mid-drag simulates a secondary contact. Moves are batched through the
//! coalescer, one flush per frame.
//!
//! Keys: `s` toggles snapping, `g` toggles the geometric scale, `q` quits.

use std::cell::RefCell;
use std::io::{Write, stdout};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind, poll, read,
};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode, size,
};
use crossterm::{execute, queue};
use trackbar::prelude::*;

const TRACK_ROW: u16 = 2;
const TRACK_LEFT: u16 = 4;
const PIT_VALUES: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

/// Observer that mirrors the last notification into a shared status line.
struct StatusObserver {
    status: Rc<RefCell<String>>,
}

impl StatusObserver {
    fn set(&self, text: &str) {
        *self.status.borrow_mut() = text.to_string();
    }
}

impl SliderObserver for StatusObserver {
    fn on_drag_start(&mut self) {
        self.set("drag start");
    }

    fn on_drag_move(&mut self) {
        self.set("drag move");
    }

    fn on_drag_end(&mut self) {
        self.set("drag end");
    }

    fn on_after_commit(&mut self) {
        self.set("committed");
    }

    fn on_click(&mut self) {
        self.set("click-to-move");
    }
}

/// Restores the terminal even on early exit.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}

struct App {
    controller: SliderController,
    coalescer: MoveCoalescer,
    status: Rc<RefCell<String>>,
    track: TrackRect,
    snap_on: bool,
    geometric: bool,
}

impl App {
    fn new(columns: u16) -> Result<Self, Error> {
        let mut controller =
            SliderController::with_values(Self::config(false), vec![20.0, 80.0])?;
        let status = Rc::new(RefCell::new("ready".to_string()));
        controller.set_observer(Box::new(StatusObserver {
            status: Rc::clone(&status),
        }));
        Ok(Self {
            controller,
            coalescer: MoveCoalescer::new(),
            status,
            track: Self::track_for(columns),
            snap_on: false,
            geometric: false,
        })
    }

    fn config(snap_on: bool) -> SliderConfig {
        SliderConfig::new()
            .with_snap(snap_on)
            .with_snap_points(PIT_VALUES.to_vec())
            .with_handle_extent(1.0)
    }

    fn track_for(columns: u16) -> TrackRect {
        let width = columns.saturating_sub(TRACK_LEFT * 2).max(10);
        TrackRect::new(
            f64::from(TRACK_LEFT),
            f64::from(TRACK_ROW),
            f64::from(width),
            1.0,
        )
    }

    fn toggle_snap(&mut self) -> Result<(), Error> {
        self.snap_on = !self.snap_on;
        self.controller.configure(Self::config(self.snap_on))
    }

    fn toggle_scale(&mut self) {
        self.geometric = !self.geometric;
        if self.geometric {
            self.controller.set_scale(Box::new(GeometricScale));
        } else {
            self.controller.set_scale(Box::new(LinearScale));
        }
    }

    /// Terminal column of a handle's center.
    fn column_of(&self, percent: f64) -> u16 {
        let offset = percent / 100.0 * (self.track.width - 1.0);
        self.track.left as u16 + offset.round() as u16
    }

    /// Translate a crossterm mouse event into a pointer event, hit-testing
    /// the handles first.
    fn translate(&self, mouse: MouseEvent) -> Option<PointerEvent> {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if row != TRACK_ROW {
                    return None;
                }
                for (handle, &percent) in self.controller.positions().iter().enumerate() {
                    if column.abs_diff(self.column_of(percent)) <= 1 {
                        return Some(PointerEvent::Down { handle });
                    }
                }
                Some(PointerEvent::TrackPress {
                    x: f64::from(column),
                    y: f64::from(row),
                })
            }
            MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move {
                x: f64::from(column),
                y: f64::from(row),
            }),
            MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
            MouseEventKind::Down(MouseButton::Right) => Some(PointerEvent::SecondaryContact),
            _ => None,
        }
    }

    fn dispatch(&mut self, event: PointerEvent) -> Result<(), Error> {
        for released in self.coalescer.push(event) {
            self.controller.process(released, self.track)?;
        }
        Ok(())
    }

    fn flush_moves(&mut self) -> Result<(), Error> {
        if let Some(pending) = self.coalescer.flush() {
            self.controller.process(pending, self.track)?;
        }
        Ok(())
    }

    fn draw(&self) -> std::io::Result<()> {
        let mut out = stdout();
        let width = self.track.width as usize;

        let mut row: Vec<char> = vec!['─'; width];
        let (fill_start, fill_end) = self.controller.progress_segment(1);
        let start = (fill_start / 100.0 * (width as f64 - 1.0)).round() as usize;
        let end = (fill_end / 100.0 * (width as f64 - 1.0)).round() as usize;
        for cell in row.iter_mut().take(end.min(width - 1) + 1).skip(start) {
            *cell = '━';
        }
        for &percent in self.controller.positions() {
            let col = (percent / 100.0 * (width as f64 - 1.0)).round() as usize;
            row[col.min(width - 1)] = '●';
        }

        let mut pits: Vec<char> = vec![' '; width];
        for percent in self.controller.pit_positions(&PIT_VALUES) {
            let col = (percent / 100.0 * (width as f64 - 1.0)).round() as usize;
            pits[col.min(width - 1)] = '▴';
        }

        let values: Vec<String> = self
            .controller
            .values()
            .iter()
            .map(|v| format!("{v:.0}"))
            .collect();
        let status = format!(
            "values [{}]  snap {}  scale {}  last: {}",
            values.join(", "),
            if self.snap_on { "on" } else { "off" },
            if self.geometric { "geometric" } else { "linear" },
            self.status.borrow().as_str()
        );

        queue!(
            out,
            Clear(ClearType::All),
            MoveTo(TRACK_LEFT, 0),
            Print("trackbar demo - drag the handles, click the track; s: snap, g: scale, q: quit"),
            MoveTo(TRACK_LEFT, TRACK_ROW),
            Print(row.into_iter().collect::<String>()),
            MoveTo(TRACK_LEFT, TRACK_ROW + 1),
            Print(pits.into_iter().collect::<String>()),
            MoveTo(TRACK_LEFT, TRACK_ROW + 3),
            Print(status),
        )?;
        out.flush()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
    let _guard = TerminalGuard;

    let (columns, _) = size()?;
    let mut app = App::new(columns)?;
    app.draw()?;

    loop {
        // Block for the first event, then drain the burst through the
        // coalescer so a fast drag costs one commit per frame.
        let first = read()?;
        let mut quit = false;
        let mut batch = vec![first];
        while poll(Duration::from_millis(0))? {
            batch.push(read()?);
        }

        for event in batch {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => quit = true,
                    KeyCode::Char('s') => app.toggle_snap()?,
                    KeyCode::Char('g') => app.toggle_scale(),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let Some(pointer) = app.translate(mouse) {
                        app.dispatch(pointer)?;
                    }
                }
                Event::Resize(new_columns, _) => {
                    app.track = App::track_for(new_columns);
                }
                _ => {}
            }
        }
        app.flush_moves()?;

        if quit {
            break;
        }
        app.draw()?;
    }

    Ok(())
}
