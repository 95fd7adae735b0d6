//! ANSI escape sequences the toolkit emits.
//!
//! Cursor movement, screen control, SGR built from a [`CellStyle`], and the
//! terminal-mode toggles (alternate screen, mouse tracking, bracketed paste,
//! focus reporting) used around an application session.

use std::io::{self, Write};

use crate::style::{Attr, CellStyle, Color};

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

// =============================================================================
// Cursor
// =============================================================================

/// Move the cursor to a 0-indexed cell position.
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, x: i32, y: i32) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

#[inline]
pub fn cursor_home<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[H")
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[?25l")
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[?25h")
}

// =============================================================================
// Screen
// =============================================================================

#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[2J")
}

#[inline]
pub fn enter_alt_screen<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[?1049h")
}

#[inline]
pub fn exit_alt_screen<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[?1049l")
}

// =============================================================================
// SGR
// =============================================================================

/// Reset all graphic attributes.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[0m")
}

/// Emit one SGR sequence selecting the full style, starting from a reset so
/// no stale attribute leaks between runs.
pub fn sgr<W: Write>(w: &mut W, style: &CellStyle) -> io::Result<()> {
    let mut seq = String::from("\x1b[0");

    let attrs = style.attrs;
    if attrs.contains(Attr::BOLD) {
        seq.push_str(";1");
    }
    if attrs.contains(Attr::DIM) {
        seq.push_str(";2");
    }
    if attrs.contains(Attr::ITALIC) {
        seq.push_str(";3");
    }
    if attrs.contains(Attr::UNDERLINE) {
        seq.push_str(";4");
    }
    if attrs.contains(Attr::BLINK) {
        seq.push_str(";5");
    }
    if attrs.contains(Attr::INVERSE) {
        seq.push_str(";7");
    }
    if attrs.contains(Attr::STRIKE) {
        seq.push_str(";9");
    }

    push_color(&mut seq, style.fg, false);
    push_color(&mut seq, style.bg, true);

    seq.push('m');
    w.write_all(seq.as_bytes())
}

/// Append the SGR parameters selecting `color`. Pure string building; this
/// is the whole color-to-escape conversion seam.
fn push_color(seq: &mut String, color: Color, background: bool) {
    use std::fmt::Write as _;
    match color {
        Color::Default => {}
        Color::Ansi(n) if n < 8 => {
            let base = if background { 40 } else { 30 };
            let _ = write!(seq, ";{}", base + n as u16);
        }
        Color::Ansi(n) if n < 16 => {
            let base = if background { 100 } else { 90 };
            let _ = write!(seq, ";{}", base + (n as u16 - 8));
        }
        Color::Ansi(n) => {
            let base = if background { 48 } else { 38 };
            let _ = write!(seq, ";{base};5;{n}");
        }
        Color::Rgb(r, g, b) => {
            let base = if background { 48 } else { 38 };
            let _ = write!(seq, ";{base};2;{r};{g};{b}");
        }
    }
}

// =============================================================================
// Terminal reporting modes
// =============================================================================

/// Enable click, motion and SGR-encoded mouse reporting.
pub fn enable_mouse<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?1000h\x1b[?1002h\x1b[?1003h\x1b[?1006h")
}

pub fn disable_mouse<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?1006l\x1b[?1003l\x1b[?1002l\x1b[?1000l")
}

pub fn enable_bracketed_paste<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?2004h")
}

pub fn disable_bracketed_paste<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?2004l")
}

pub fn enable_focus_reporting<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?1004h")
}

pub fn disable_focus_reporting<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?1004l")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sgr_string(style: &CellStyle) -> String {
        let mut buf = Vec::new();
        sgr(&mut buf, style).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn default_style_is_bare_reset() {
        assert_eq!(sgr_string(&CellStyle::DEFAULT), "\x1b[0m");
    }

    #[test]
    fn basic_palette_uses_short_codes() {
        let s = CellStyle::new(Color::RED, Color::BLUE);
        assert_eq!(sgr_string(&s), "\x1b[0;31;44m");
    }

    #[test]
    fn bright_and_extended_palette() {
        let s = CellStyle::new(Color::Ansi(9), Color::Ansi(208));
        assert_eq!(sgr_string(&s), "\x1b[0;91;48;5;208m");
    }

    #[test]
    fn truecolor_and_attrs() {
        let s = CellStyle::new(Color::Rgb(1, 2, 3), Color::Default).with_attrs(Attr::BOLD | Attr::UNDERLINE);
        assert_eq!(sgr_string(&s), "\x1b[0;1;4;38;2;1;2;3m");
    }

    #[test]
    fn cursor_is_one_indexed_on_the_wire() {
        let mut buf = Vec::new();
        cursor_to(&mut buf, 0, 0).unwrap();
        assert_eq!(buf, b"\x1b[1;1H");

        buf.clear();
        cursor_to(&mut buf, 5, 10).unwrap();
        assert_eq!(buf, b"\x1b[11;6H");
    }
}
