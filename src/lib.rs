//! # ember-tui
//!
//! Element-tree terminal UI toolkit.
//!
//! A tree of styled, nestable elements is laid out by an integer box model
//! into rectangles of the character grid, painted into a z-indexed cell
//! buffer, diffed against the previous frame, and flushed to the terminal
//! as a minimal escape-sequence stream. A dedicated input thread decodes
//! raw terminal bytes (keys, mouse, focus, paste, window-ops and DEC
//! responses) into typed events drained by the application tick.
//!
//! # Architecture
//!
//! ```text
//! Element tree + styles
//!        │ box-model layout (margin → border → padding)
//!        ▼
//!    Rectangles ── text wrapping refines content rects into lines
//!        │ paint (z-indexed, change-tracked)
//!        ▼
//!    Screen (cell buffer) ── flush() → minimal change list
//!        │
//!        ▼
//!    TerminalWriter → cursor moves + SGR runs → terminal device
//!
//! stdin bytes → Decoder state machine → event queue → App tick
//! ```
//!
//! # Modules
//!
//! - [`geometry`] - points, sizes, corner-normalized rectangles
//! - [`style`] - colors, dimensions, the property set, cascade blocks
//! - [`element`] - the element tree and built-in elements
//! - [`layout`] - box-model resolution, alignment, flex distribution
//! - [`text`] - visible-width measurement and greedy wrapping
//! - [`render`] - cell buffer, diff compositor, escape writer
//! - [`input`] - escape-sequence decoder and the input thread
//! - [`dom`] - XML documents and selector stylesheets
//! - [`app`] - application loop and terminal session

pub mod app;
pub mod dom;
pub mod element;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod render;
pub mod style;
pub mod text;

pub use app::{App, AppConfig};
pub use dom::{load_str, Stylesheet};
pub use element::{
    dispatch_key, dispatch_mouse, take_tree_updated, Argument, ArgValue, BoolArgument, Checkbox,
    Div, Element, ElementFactory, ElementInfo, ListView, Paragraph, Registry, StringArgument,
    Text, TextInput,
};
pub use error::{AppError, DomError, InputError, LayoutError, StyleError};
pub use geometry::{Point, Rectangle, Size};
pub use input::{
    DecReqResponse, Decoder, InputDriver, InputEvent, KeyCode, KeyEvent, Modifiers, MouseEvent,
    MouseKind, WinOpsResponse,
};
pub use layout::LayoutContext;
pub use render::{Change, Screen, TerminalWriter};
pub use style::{
    AlignH, AlignV, Attr, BorderKind, BorderStyle, CellStyle, Color, Dimension, Display,
    FlexDirection, Overflow, PropertyKind, Spacing, StyleBlock, StyleProperty,
};
pub use text::{visible_width, wrap_text};
