//! Wrapped-text element.

use crate::error::LayoutError;
use crate::geometry::Rectangle;
use crate::layout::{
    align_offset_h, align_offset_v, border_rect, content_rect, horizontal_chrome, vertical_chrome,
    LayoutContext,
};
use crate::render::Screen;
use crate::style::{CellStyle, Display, Overflow, StyleBlock};
use crate::text::{strip_ansi, text_block_height, visible_width, wrap_text, DefaultFont, Font};

use super::{Element, ElementInfo};

/// A paragraph of text, word-wrapped to its content rectangle.
pub struct Paragraph {
    info: ElementInfo,
    style: StyleBlock,
    content: String,
    font: Box<dyn Font>,
}

impl Paragraph {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            info: ElementInfo::default(),
            style: StyleBlock::new(),
            content: content.into(),
            font: Box::new(DefaultFont),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text. A no-op value does not dirty the element.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content == self.content {
            return;
        }
        self.content = content;
        self.info.mark_updated();
    }

    /// Swap the font capability used for metrics.
    pub fn set_font(&mut self, font: Box<dyn Font>) {
        self.font = font;
        self.info.mark_updated();
    }
}

impl Element for Paragraph {
    fn tag(&self) -> &'static str {
        "p"
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

    fn min_width(&self, _max_height: i32) -> i32 {
        // Narrowest useful width: the widest single word.
        let chrome = horizontal_chrome(
            &self.style.margin(),
            &self.style.padding(),
            &self.style.border(),
            0,
        );
        self.content
            .split_whitespace()
            .map(|w| visible_width(w) as i32)
            .max()
            .unwrap_or(0)
            + chrome
    }

    fn height_for(&self, max_width: i32) -> i32 {
        let chrome_h = horizontal_chrome(
            &self.style.margin(),
            &self.style.padding(),
            &self.style.border(),
            max_width,
        );
        let chrome_v = vertical_chrome(
            &self.style.margin(),
            &self.style.padding(),
            &self.style.border(),
            max_width,
        );
        let inner = (max_width - chrome_h).max(1);
        let lines = wrap_text(&self.content, inner as usize);
        text_block_height(self.font.as_ref(), lines.len()) + chrome_v
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

        let lines = wrap_text(&self.content, content.width().max(1) as usize);
        let text_style = CellStyle::new(self.style.color(), self.style.background_color());

        let clip = match self.style.overflow() {
            Overflow::Hidden => content,
            Overflow::Visible => screen.bounds(),
        };

        let line_height = self.font.line_height() + self.font.line_spacing();
        let block = text_block_height(self.font.as_ref(), lines.len());
        let v_offset = align_offset_v(self.style.align_v(), content.height(), block);

        for (i, line) in lines.iter().enumerate() {
            let y = content.lower_y() + v_offset + i as i32 * line_height;
            if y > clip.higher_y() {
                break;
            }
            // Cells carry their style explicitly; embedded escape sequences
            // were measured as zero-width and are dropped at paint time.
            let plain = strip_ansi(line);
            let x = content.lower_x()
                + align_offset_h(
                    self.style.align_h(),
                    content.width(),
                    visible_width(&plain) as i32,
                );
            screen.draw_text_line(x, y, &plain, text_style, clip, z);
        }

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
    use crate::style::{AlignH, BorderStyle, Color, Dimension, Spacing, StyleProperty};

    #[test]
    fn measures_wrapped_height() {
        let p = Paragraph::new("one two three four");
        // Width 9 wraps to "one two" / "three" / "four".
        assert_eq!(p.height_for(9), 3);
        assert_eq!(p.height_for(100), 1);
    }

    #[test]
    fn min_width_is_the_widest_word() {
        let p = Paragraph::new("a incomprehensibilities b");
        assert_eq!(p.min_width(10), "incomprehensibilities".len() as i32);
    }

    #[test]
    fn chrome_adds_to_measurements() {
        let mut p = Paragraph::new("word");
        p.style_mut()
            .set(StyleProperty::Border(BorderStyle::solid(Color::Default)));
        p.style_mut()
            .set(StyleProperty::Padding(Spacing::uniform(Dimension::Chars(1))));
        assert_eq!(p.width_for(5), 4 + 2 + 2);
        // Border + padding rows wrap around the single text line.
        assert_eq!(p.height_for(20), 1 + 2 + 2);
    }

    #[test]
    fn renders_wrapped_lines_into_cells() {
        let p = Paragraph::new("ab cd");
        let mut screen = Screen::new(2, 3);
        screen.begin_frame();
        let bounds = screen.bounds();
        p.render(&mut screen, bounds, &LayoutContext::default())
            .unwrap();

        assert_eq!(screen.get(0, 0).unwrap().ch(), Some('a'));
        assert_eq!(screen.get(1, 0).unwrap().ch(), Some('b'));
        assert_eq!(screen.get(0, 1).unwrap().ch(), Some('c'));
        assert_eq!(screen.get(1, 1).unwrap().ch(), Some('d'));
    }

    #[test]
    fn centered_text_offsets_into_slack() {
        let mut p = Paragraph::new("hi");
        p.style_mut().set(StyleProperty::AlignH(AlignH::Center));
        let mut screen = Screen::new(10, 1);
        screen.begin_frame();
        let bounds = screen.bounds();
        p.render(&mut screen, bounds, &LayoutContext::default())
            .unwrap();

        assert_eq!(screen.get(4, 0).unwrap().ch(), Some('h'));
        assert_eq!(screen.get(5, 0).unwrap().ch(), Some('i'));
    }

    #[test]
    fn hidden_overflow_clips_to_content() {
        let p = Paragraph::new("aaa bbb ccc ddd");
        let mut screen = Screen::new(3, 2);
        screen.begin_frame();
        // Content is 3x2 but the text needs 4 lines; the extra lines vanish.
        p.render(&mut screen, Rectangle::new(0, 0, 2, 1), &LayoutContext::default())
            .unwrap();
        assert_eq!(screen.get(0, 0).unwrap().ch(), Some('a'));
        assert_eq!(screen.get(0, 1).unwrap().ch(), Some('b'));
    }

    #[test]
    fn identical_set_content_does_not_dirty() {
        let mut p = Paragraph::new("same");
        p.info_mut().take_updated();
        p.set_content("same");
        assert!(!p.info_mut().take_updated());
        p.set_content("different");
        assert!(p.info_mut().take_updated());
    }
}
