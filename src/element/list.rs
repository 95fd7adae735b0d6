//! List element: block-stacked items behind a marker gutter.

use crate::error::LayoutError;
use crate::geometry::Rectangle;
use crate::layout::{border_rect, content_rect, LayoutContext};
use crate::render::Screen;
use crate::style::{Display, StyleBlock, StyleProperty};

use super::div::{container_height, container_min_width, container_width, render_list_children};
use super::{Element, ElementInfo};

/// An unordered list. Items stack like Block children, each behind a
/// fixed-width gutter holding the marker glyph.
pub struct ListView {
    info: ElementInfo,
    style: StyleBlock,
    children: Vec<Box<dyn Element>>,
}

impl ListView {
    pub fn new() -> Self {
        Self::with_children(Vec::new())
    }

    pub fn with_children(children: Vec<Box<dyn Element>>) -> Self {
        // The element's whole point is the gutter layout.
        let style = StyleBlock::new().with(StyleProperty::Display(Display::List));
        Self {
            info: ElementInfo::default(),
            style,
            children,
        }
    }

    /// Replace the marker glyph drawn in the gutter.
    pub fn set_marker(&mut self, marker: impl Into<String>) {
        self.style.set(StyleProperty::ListMarker(marker.into()));
        self.info.mark_updated();
    }

    pub fn push(&mut self, child: Box<dyn Element>) {
        self.children.push(child);
        self.info.mark_updated();
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for ListView {
    fn tag(&self) -> &'static str {
        "ul"
    }

    fn info(&self) -> &ElementInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        &mut self.info
    }

    fn style(&self) -> &StyleBlock {
        &self.style
    }

    fn style_mut(&mut self) -> &mut StyleBlock {
        self.info.mark_updated();
        &mut self.style
    }

    fn children(&self) -> &[Box<dyn Element>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Element>] {
        &mut self.children
    }

    fn width_for(&self, max_height: i32) -> i32 {
        container_width(&self.children, &self.style, max_height)
    }

    fn min_width(&self, max_height: i32) -> i32 {
        container_min_width(&self.children, &self.style, max_height)
    }

    fn height_for(&self, max_width: i32) -> i32 {
        container_height(&self.children, &self.style, max_width)
    }

    fn render(
        &self,
        screen: &mut Screen,
        rect: Rectangle,
        ctx: &LayoutContext,
    ) -> Result<(), LayoutError> {
        if self.style.display() == Display::None {
            return Ok(());
        }

        let z = self.style.z_index();
        let bb = border_rect(rect, &self.style.margin());
        let content = content_rect(
            rect,
            &self.style.margin(),
            &self.style.padding(),
            &self.style.border(),
        );

        screen.fill_rect(bb, self.style.background_color(), z);
        screen.draw_border(bb, self.style.border(), self.style.background_color(), z);

        render_list_children(&self.children, &self.style, screen, content, ctx)
    }

    fn adopt_children(&mut self, children: Vec<Box<dyn Element>>) -> bool {
        self.children.extend(children);
        self.info.mark_updated();
        true
    }
}
