//! Rendering: the z-indexed cell buffer, the diff compositor, and the
//! escape-sequence writer.
//!
//! Elements paint into [`Screen`]; [`Screen::flush`] yields the minimal
//! change list; [`TerminalWriter`] turns it into cursor-move + SGR + glyph
//! output batched into a single device write per frame.

pub mod ansi;
mod cell;
mod screen;
mod writer;

pub use cell::{Cell, UNCLAIMED_Z};
pub use screen::{Change, Screen};
pub use writer::{OutputBuffer, TerminalWriter};
