//! Single-run text element: one unwrapped line, clipped to its box.

use crate::error::LayoutError;
use crate::geometry::Rectangle;
use crate::layout::{
    align_offset_h, align_offset_v, border_rect, content_rect, horizontal_chrome, vertical_chrome,
    LayoutContext,
};
use crate::render::Screen;
use crate::style::{Attr, CellStyle, Display, Overflow, StyleBlock};
use crate::text::{strip_ansi, visible_width};

use super::{Element, ElementInfo};

/// A single unwrapped run of styled text.
pub struct Text {
    info: ElementInfo,
    style: StyleBlock,
    content: String,
    attrs: Attr,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            info: ElementInfo::default(),
            style: StyleBlock::new(),
            content: content.into(),
            attrs: Attr::NONE,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content == self.content {
            return;
        }
        self.content = content;
        self.info.mark_updated();
    }

    /// Text attributes (bold, underline, ...) applied to the run.
    pub fn set_attrs(&mut self, attrs: Attr) {
        if attrs == self.attrs {
            return;
        }
        self.attrs = attrs;
        self.info.mark_updated();
    }
}

impl Element for Text {
    fn tag(&self) -> &'static str {
        "text"
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

    fn width_for(&self, _max_height: i32) -> i32 {
        let chrome = horizontal_chrome(
            &self.style.margin(),
            &self.style.padding(),
            &self.style.border(),
            0,
        );
        visible_width(&self.content) as i32 + chrome
    }

    fn height_for(&self, max_width: i32) -> i32 {
        1 + vertical_chrome(
            &self.style.margin(),
            &self.style.padding(),
            &self.style.border(),
            max_width,
        )
    }

    fn render(
        &self,
        screen: &mut Screen,
        rect: Rectangle,
        _ctx: &LayoutContext,
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

        let clip = match self.style.overflow() {
            Overflow::Hidden => content,
            Overflow::Visible => screen.bounds(),
        };

        let plain = strip_ansi(&self.content);
        let x = content.lower_x()
            + align_offset_h(
                self.style.align_h(),
                content.width(),
                visible_width(&plain) as i32,
            );
        let y = content.lower_y() + align_offset_v(self.style.align_v(), content.height(), 1);

        let style = CellStyle::new(self.style.color(), self.style.background_color())
            .with_attrs(self.attrs);
        screen.draw_text_line(x, y, &plain, style, clip, z);
        Ok(())
    }

    fn set_text(&mut self, text: &str) -> bool {
        self.set_content(text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_measurement() {
        let t = Text::new("status: ok");
        assert_eq!(t.width_for(1), 10);
        assert_eq!(t.height_for(100), 1);
    }

    #[test]
    fn renders_one_line_clipped() {
        let t = Text::new("overlong content");
        let mut screen = Screen::new(4, 1);
        screen.begin_frame();
        let bounds = screen.bounds();
        t.render(&mut screen, bounds, &LayoutContext::default())
            .unwrap();
        assert_eq!(screen.get(0, 0).unwrap().ch(), Some('o'));
        assert_eq!(screen.get(3, 0).unwrap().ch(), Some('r'));
    }
}
