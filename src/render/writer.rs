//! Terminal writer: serializes a change list into minimal escape output.
//!
//! Bytes accumulate in an [`OutputBuffer`] and reach the device in one write
//! per frame. Per change the writer emits a cursor move only when the cell is
//! not the immediate successor of the previous one (coalescing runs on a row
//! into one move plus a run of glyphs) and an SGR only when the style differs
//! from the previously emitted style.

use std::io::{self, Write};

use super::ansi;
use super::screen::Change;
use crate::style::CellStyle;

/// A byte buffer that batches a frame's worth of output into one device
/// write.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(16 * 1024),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write the accumulated bytes to `sink` and clear the buffer.
    pub fn flush_to<W: Write>(&mut self, sink: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        sink.write_all(&self.data)?;
        sink.flush()?;
        self.data.clear();
        Ok(())
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serializes flushed cell changes into escape output.
#[derive(Debug)]
pub struct TerminalWriter {
    buf: OutputBuffer,
    last_x: i32,
    last_y: i32,
    last_style: Option<CellStyle>,
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self {
            buf: OutputBuffer::new(),
            last_x: -2,
            last_y: -2,
            last_style: None,
        }
    }

    /// Serialize `changes` and write them to `sink` in one batch.
    ///
    /// Tracking state is reset per frame, so the first change always emits a
    /// cursor move and an SGR.
    pub fn write_frame<W: Write>(&mut self, changes: &[Change], sink: &mut W) -> io::Result<()> {
        self.last_x = -2;
        self.last_y = -2;
        self.last_style = None;

        for change in changes {
            self.emit(change)?;
        }

        self.buf.flush_to(sink)
    }

    fn emit(&mut self, change: &Change) -> io::Result<()> {
        // Continuation half of a wide glyph: nothing to output, but the
        // position advances so run coalescing stays correct.
        let Some(ch) = change.ch else {
            self.last_x = change.x;
            self.last_y = change.y;
            return Ok(());
        };

        if change.y != self.last_y || change.x != self.last_x + 1 {
            ansi::cursor_to(&mut self.buf, change.x, change.y)?;
        }

        if self.last_style != Some(change.style) {
            ansi::sgr(&mut self.buf, &change.style)?;
            self.last_style = Some(change.style);
        }

        let mut utf8 = [0u8; 4];
        self.buf.write_all(ch.encode_utf8(&mut utf8).as_bytes())?;

        self.last_x = change.x;
        self.last_y = change.y;
        Ok(())
    }
}

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{CellStyle, Color};

    fn change(x: i32, y: i32, ch: char, style: CellStyle) -> Change {
        Change {
            x,
            y,
            ch: Some(ch),
            style,
        }
    }

    fn render(changes: &[Change]) -> String {
        let mut writer = TerminalWriter::new();
        let mut sink = Vec::new();
        writer.write_frame(changes, &mut sink).unwrap();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn consecutive_cells_coalesce_into_one_move() {
        let style = CellStyle::DEFAULT;
        let out = render(&[
            change(0, 0, 'a', style),
            change(1, 0, 'b', style),
            change(2, 0, 'c', style),
        ]);
        assert_eq!(out.matches("\x1b[1;1H").count(), 1);
        assert_eq!(out.matches('H').count(), 1, "one cursor move total");
        assert!(out.ends_with("abc"));
    }

    #[test]
    fn style_emitted_only_on_change() {
        let red = CellStyle::new(Color::RED, Color::Default);
        let out = render(&[
            change(0, 0, 'a', red),
            change(1, 0, 'b', red),
            change(2, 0, 'c', CellStyle::DEFAULT),
        ]);
        assert_eq!(out.matches("\x1b[0;31m").count(), 1);
        assert_eq!(out.matches('m').count(), 2, "two SGR sequences total");
    }

    #[test]
    fn row_break_forces_cursor_move() {
        let style = CellStyle::DEFAULT;
        let out = render(&[change(5, 0, 'a', style), change(0, 1, 'b', style)]);
        assert_eq!(out.matches('H').count(), 2);
    }

    #[test]
    fn continuation_cells_emit_nothing_but_keep_the_run() {
        let style = CellStyle::DEFAULT;
        let out = render(&[
            Change { x: 0, y: 0, ch: Some('中'), style },
            Change { x: 1, y: 0, ch: None, style },
            change(2, 0, 'x', style),
        ]);
        // The continuation advanced the tracked position, so 'x' continues
        // the run without a second cursor move.
        assert_eq!(out.matches('H').count(), 1);
        assert!(out.ends_with("中x"));
    }

    #[test]
    fn empty_frame_writes_nothing() {
        assert!(render(&[]).is_empty());
    }
}
