//! Text layout: visible-width measurement, greedy wrapping, and the opaque
//! font capability.

mod font;
mod measure;
mod wrap;

pub use font::{text_block_height, DefaultFont, Font};
pub use measure::{grapheme_width, strip_ansi, visible_width};
pub use wrap::{measure_height, wrap_text};
