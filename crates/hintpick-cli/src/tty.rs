//! Raw-mode terminal shim for the interactive loop.
//!
//! All overlay I/O goes through `/dev/tty`, leaving stdout free to carry the
//! selection result. The loop blocks on one event at a time, runs the
//! selector transition synchronously, redraws, and blocks again.

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen, SetTitle,
};
use crossterm::{execute, queue};
use tracing::debug;

use hintpick_core::error::HintError;
use hintpick_core::select::{Event, Outcome, Selector};

/// Environment override for the capture width, for callers that captured a
/// window other than the one hintpick runs in.
pub const COLS_ENV: &str = "HINTPICK_COLS";

/// Width of the captured screen, from the environment override or the live
/// terminal. A malformed override is a fatal startup error.
pub fn screen_columns() -> Result<usize> {
    if let Ok(value) = std::env::var(COLS_ENV) {
        let cols: usize = value
            .parse()
            .map_err(|_| HintError::InvalidWidth(format!("{COLS_ENV}={value:?}")))?;
        if cols == 0 {
            return Err(HintError::InvalidWidth(format!("{COLS_ENV} must be > 0")).into());
        }
        return Ok(cols);
    }
    let (cols, _rows) = size().context("querying terminal size")?;
    Ok(cols as usize)
}

/// Run the interactive loop until the selector terminates.
pub fn run(selector: &mut Selector, title: &str) -> Result<Outcome> {
    let mut tty = File::options()
        .read(true)
        .write(true)
        .open("/dev/tty")
        .context("opening /dev/tty")?;

    enable_raw_mode().context("entering raw mode")?;
    let outcome = drive(selector, &mut tty, title);
    // Restore the terminal even when drawing failed.
    let _ = execute!(tty, LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
    outcome
}

fn drive(selector: &mut Selector, tty: &mut File, title: &str) -> Result<Outcome> {
    execute!(tty, EnterAlternateScreen, Hide, SetTitle(title))?;
    loop {
        draw(selector, tty)?;
        let ev = next_event()?;
        match selector.handle(ev) {
            Outcome::Continue => {}
            outcome => {
                debug!(?outcome, "selection loop finished");
                return Ok(outcome);
            }
        }
    }
}

fn draw(selector: &mut Selector, tty: &mut File) -> Result<()> {
    queue!(tty, Clear(ClearType::All), MoveTo(0, 0))?;
    tty.write_all(selector.rendered().as_bytes())?;
    tty.flush()?;
    Ok(())
}

/// Block for the next terminal event the selector cares about.
fn next_event() -> Result<Event> {
    loop {
        match event::read()? {
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                if let Some(ev) = translate_key(key) {
                    return Ok(ev);
                }
            }
            TermEvent::Resize(_, _) => return Ok(Event::Resize),
            _ => {}
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<Event> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Event::Interrupt),
            KeyCode::Char('d') => Some(Event::Eof),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(c) => Some(Event::Char(c)),
        KeyCode::Backspace => Some(Event::Backspace),
        KeyCode::Enter => Some(Event::Enter),
        KeyCode::Esc => Some(Event::Escape),
        _ => None,
    }
}
