//! Styling: colors, dimensions, the closed property set, and cascade blocks.
//!
//! Properties are a single tagged enum keyed by [`PropertyKind`] rather than
//! a trait hierarchy; a name table serves XML and stylesheet lookups, and
//! every kind carries a static default so resolved styles never need
//! null-checking.

mod block;
mod color;
mod dimension;
mod properties;

pub use block::StyleBlock;
pub use color::{Attr, CellStyle, Color};
pub use dimension::{Axis, Dimension};
pub use properties::{
    AlignH, AlignV, BorderChars, BorderKind, BorderStyle, Display, FlexDirection, Overflow,
    PropertyKind, Spacing, StyleProperty, PROPERTY_NAMES,
};
