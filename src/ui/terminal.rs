//! Interactive terminal front-end.
//!
//! Draws the readout in a framed box with a key legend underneath and feeds
//! key presses to the widget until the user quits.

use super::display::DisplaySurface;
use super::widget::Calculator;
use crate::calculator::ExpressionEngine;
use crate::input::{KEY_LEGEND, from_key};
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{self, Stdout, Write, stdout};
use tracing::{info, warn};

/// Inner width of the readout box.
const DISPLAY_WIDTH: usize = 28;

/// Raw-mode alternate screen, restored on drop.
struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e).context("failed to enter alternate screen");
        }
        Ok(Self { out })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Renders the readout to a terminal.
pub struct TerminalDisplay<W: Write> {
    out: W,
    error_marker: String,
    last: String,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, error_marker: impl Into<String>) -> Self {
        Self {
            out,
            error_marker: error_marker.into(),
            last: String::new(),
        }
    }

    /// Draw the last readout again, e.g. after a resize.
    pub fn redraw(&mut self) -> io::Result<()> {
        let text = std::mem::take(&mut self.last);
        let result = self.draw(&text);
        self.last = text;
        result
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, text: &str) -> io::Result<()> {
        let border = "─".repeat(DISPLAY_WIDTH + 2);
        let shown = fit_width(text, DISPLAY_WIDTH);
        let color = if text == self.error_marker {
            // Error color: orange/red-ish
            Color::Rgb {
                r: 230,
                g: 110,
                b: 80,
            }
        } else {
            Color::Reset
        };

        queue!(
            self.out,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Print(format!("┌{border}┐")),
            MoveTo(0, 1),
            Print("│ "),
            SetForegroundColor(color),
            Print(format!("{shown:>width$}", width = DISPLAY_WIDTH)),
            ResetColor,
            Print(" │"),
            MoveTo(0, 2),
            Print(format!("└{border}┘")),
        )?;

        for (row, (key, meaning)) in KEY_LEGEND.iter().enumerate() {
            queue!(
                self.out,
                MoveTo(1, 4 + row as u16),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("{key:>8}")),
                ResetColor,
                Print(format!("  {meaning}")),
            )?;
        }

        self.out.flush()
    }
}

impl<W: Write> DisplaySurface for TerminalDisplay<W> {
    fn render(&mut self, text: &str) {
        if let Err(e) = self.draw(text) {
            warn!(error = %e, "failed to draw display");
        }
        self.last = text.to_string();
    }
}

/// Keep the tail of `text` when it is wider than the box.
fn fit_width(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    let tail: String = text.chars().skip(len - (width - 1)).collect();
    format!("…{tail}")
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => key.modifiers.is_empty(),
        _ => false,
    }
}

/// Run the interactive calculator until the user quits.
pub fn run_interactive(engine: ExpressionEngine, error_marker: &str) -> Result<()> {
    let _session = TerminalSession::enter()?;
    let display = TerminalDisplay::new(stdout(), error_marker);
    let mut calc = Calculator::new(engine, display);
    info!("interactive session started");

    loop {
        match event::read().context("failed to read terminal event")? {
            Event::Key(key) if is_quit(&key) => break,
            Event::Key(key) => {
                if let Some(input) = from_key(key) {
                    calc.dispatch(input);
                }
            }
            Event::Resize(..) => calc
                .surface_mut()
                .redraw()
                .context("failed to redraw display")?,
            _ => {}
        }
    }

    info!(expression = calc.engine().expression(), "interactive session ended");
    Ok(())
}
