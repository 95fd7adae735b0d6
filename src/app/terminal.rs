//! Terminal session setup and teardown.
//!
//! Raw mode goes through crossterm; every protocol toggle (alternate
//! screen, mouse tracking, bracketed paste, focus reporting) is written as
//! escape bytes by `render::ansi`. Teardown mirrors setup in reverse and
//! also runs on drop, so a panicking application still restores the
//! terminal.

use std::io::{self, Write};

use tracing::debug;

use crate::render::ansi;
use crate::render::OutputBuffer;

/// An active fullscreen terminal session.
#[derive(Debug)]
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode, the alternate screen, and enable mouse, bracketed
    /// paste and focus reporting.
    pub fn enter_fullscreen() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        let mut out = OutputBuffer::new();
        ansi::enter_alt_screen(&mut out)?;
        ansi::cursor_hide(&mut out)?;
        ansi::clear_screen(&mut out)?;
        ansi::enable_mouse(&mut out)?;
        ansi::enable_bracketed_paste(&mut out)?;
        ansi::enable_focus_reporting(&mut out)?;
        out.flush_to(&mut io::stdout())?;

        debug!("entered fullscreen terminal session");
        Ok(Self { active: true })
    }

    /// Current terminal size in cells.
    pub fn size() -> io::Result<(i32, i32)> {
        let (w, h) = crossterm::terminal::size()?;
        Ok((w as i32, h as i32))
    }

    /// Restore the terminal. Safe to call twice.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut out = OutputBuffer::new();
        ansi::disable_focus_reporting(&mut out)?;
        ansi::disable_bracketed_paste(&mut out)?;
        ansi::disable_mouse(&mut out)?;
        ansi::reset(&mut out)?;
        ansi::cursor_show(&mut out)?;
        ansi::exit_alt_screen(&mut out)?;
        out.flush_to(&mut io::stdout())?;
        io::stdout().flush()?;

        crossterm::terminal::disable_raw_mode()?;
        debug!("terminal session restored");
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
