//! Declarative documents: the XML element dialect and selector stylesheets.

mod loader;
mod stylesheet;

pub use loader::load_str;
pub use stylesheet::{Selector, Stylesheet};
