//! The element tree.
//!
//! Elements own their children exclusively (no shared ownership, no cycles),
//! carry a style block and selector metadata, and implement the measurement
//! contract the box-model engine drives: width within a height budget,
//! height within a width budget, and the min-content variants of both.
//! Property setters flip the element's updated flag, which the application
//! tick collects to decide whether to re-render.

mod div;
mod interactive;
mod list;
mod paragraph;
mod registry;
mod text;

pub use div::Div;
pub use interactive::{Argument, ArgValue, BoolArgument, Checkbox, StringArgument, TextInput};
pub use list::ListView;
pub use paragraph::Paragraph;
pub use registry::{ElementFactory, Registry};
pub use text::Text;

use crate::error::LayoutError;
use crate::geometry::Rectangle;
use crate::input::{KeyEvent, MouseEvent};
use crate::layout::LayoutContext;
use crate::render::Screen;
use crate::style::StyleBlock;

/// Identity and bookkeeping shared by every element.
#[derive(Debug, Clone, Default)]
pub struct ElementInfo {
    id: Option<String>,
    classes: Vec<String>,
    updated: bool,
}

impl ElementInfo {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
        self.updated = true;
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.push(class.into());
        self.updated = true;
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Flag the element as needing layout/render.
    pub fn mark_updated(&mut self) {
        self.updated = true;
    }

    /// Read and clear the updated flag.
    pub fn take_updated(&mut self) -> bool {
        std::mem::take(&mut self.updated)
    }
}

/// A node in the UI tree.
pub trait Element {
    /// Tag name used for selector matching and XML loading.
    fn tag(&self) -> &'static str;

    fn info(&self) -> &ElementInfo;
    fn info_mut(&mut self) -> &mut ElementInfo;

    fn style(&self) -> &StyleBlock;
    fn style_mut(&mut self) -> &mut StyleBlock;

    /// Merge a style block over the element's own (stylesheet cascade).
    fn apply_styles(&mut self, styles: &StyleBlock) {
        self.style_mut().override_with(styles);
        self.info_mut().mark_updated();
    }

    fn children(&self) -> &[Box<dyn Element>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Element>] {
        &mut []
    }

    // =========================================================================
    // Measurement (the bottom-up half of layout)
    // =========================================================================

    /// Preferred width within a height budget, chrome included.
    fn width_for(&self, max_height: i32) -> i32;

    /// Narrowest acceptable width within a height budget.
    fn min_width(&self, max_height: i32) -> i32 {
        self.width_for(max_height)
    }

    /// Height within a width budget, chrome included.
    fn height_for(&self, max_width: i32) -> i32;

    /// Shortest acceptable height within a width budget.
    fn min_height(&self, max_width: i32) -> i32 {
        self.height_for(max_width)
    }

    // =========================================================================
    // Rendering and events
    // =========================================================================

    /// Paint the element into `rect` on the screen.
    fn render(
        &self,
        screen: &mut Screen,
        rect: Rectangle,
        ctx: &LayoutContext,
    ) -> Result<(), LayoutError>;

    /// Handle a key event. Return `true` when consumed.
    fn on_key(&mut self, _event: &KeyEvent) -> bool {
        false
    }

    /// Handle a mouse event. Return `true` when consumed.
    fn on_mouse(&mut self, _event: &MouseEvent) -> bool {
        false
    }

    // =========================================================================
    // Document-construction hooks (XML loader)
    // =========================================================================

    /// Accept document text content. Return `false` when the element has no
    /// use for text.
    fn set_text(&mut self, _text: &str) -> bool {
        false
    }

    /// Accept child elements from a document. Return `false` when the
    /// element cannot hold children.
    fn adopt_children(&mut self, _children: Vec<Box<dyn Element>>) -> bool {
        false
    }

    /// Apply a non-style document attribute (an element property). Return
    /// `true` when the name was recognized.
    fn set_attribute(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}

/// Clear updated flags across a tree, reporting whether any was set.
pub fn take_tree_updated(element: &mut dyn Element) -> bool {
    let mut updated = element.info_mut().take_updated();
    for child in element.children_mut() {
        updated |= take_tree_updated(child.as_mut());
    }
    updated
}

/// Dispatch a key event through a tree, stopping at the first consumer.
pub fn dispatch_key(element: &mut dyn Element, event: &KeyEvent) -> bool {
    if element.on_key(event) {
        return true;
    }
    for child in element.children_mut() {
        if dispatch_key(child.as_mut(), event) {
            return true;
        }
    }
    false
}

/// Dispatch a mouse event through a tree, stopping at the first consumer.
pub fn dispatch_mouse(element: &mut dyn Element, event: &MouseEvent) -> bool {
    if element.on_mouse(event) {
        return true;
    }
    for child in element.children_mut() {
        if dispatch_mouse(child.as_mut(), event) {
            return true;
        }
    }
    false
}
