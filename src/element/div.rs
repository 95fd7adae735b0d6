//! The generic container element.
//!
//! A `Div` owns a list of children and lays them out per its display mode:
//! Block stacks vertically, Flex distributes along the flex direction, List
//! is Block with a marker gutter, None removes the subtree entirely. The
//! child-placement routines are shared with the dedicated list element.

use crate::error::LayoutError;
use crate::geometry::Rectangle;
use crate::layout::{
    align_offset_h, align_offset_v, border_rect, clamp_min, content_rect, distribute_flex,
    horizontal_chrome, resolve_size, vertical_chrome, LayoutContext,
};
use crate::render::Screen;
use crate::style::{Axis, Display, Overflow, StyleBlock};
use crate::text::visible_width;

use super::{Element, ElementInfo};

/// A nestable box containing other elements.
#[derive(Default)]
pub struct Div {
    info: ElementInfo,
    style: StyleBlock,
    children: Vec<Box<dyn Element>>,
}

impl Div {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<Box<dyn Element>>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: StyleBlock) -> Self {
        self.style = style;
        self
    }

    /// Append a child, taking ownership.
    pub fn push(&mut self, child: Box<dyn Element>) {
        self.children.push(child);
        self.info.mark_updated();
    }

    /// Remove and return the child at `index`; ownership transfers back to
    /// the caller and the element leaves the tree.
    pub fn remove_child(&mut self, index: usize) -> Box<dyn Element> {
        self.info.mark_updated();
        self.children.remove(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Element for Div {
    fn tag(&self) -> &'static str {
        "div"
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
        render_container(&self.children, &self.style, screen, rect, ctx)
    }

    fn adopt_children(&mut self, children: Vec<Box<dyn Element>>) -> bool {
        self.children.extend(children);
        self.info.mark_updated();
        true
    }
}

// =============================================================================
// Shared container layout
// =============================================================================

/// Horizontal gap between flex-row children laid out at natural size.
const FLEX_GAP: i32 = 1;

pub(crate) fn render_container(
    children: &[Box<dyn Element>],
    style: &StyleBlock,
    screen: &mut Screen,
    rect: Rectangle,
    ctx: &LayoutContext,
) -> Result<(), LayoutError> {
    let display = style.display();
    if display == Display::None {
        return Ok(());
    }

    let z = style.z_index();
    let bb = border_rect(rect, &style.margin());
    let content = content_rect(rect, &style.margin(), &style.padding(), &style.border());

    screen.fill_rect(bb, style.background_color(), z);
    screen.draw_border(bb, style.border(), style.background_color(), z);

    match display {
        Display::Block => render_block_children(children, style, screen, content, ctx),
        Display::Flex => {
            if style.flex_direction().is_row() {
                render_flex_row(children, style, screen, content, ctx)
            } else {
                render_flex_column(children, style, screen, content, ctx)
            }
        }
        Display::List => render_list_children(children, style, screen, content, ctx),
        Display::None => Ok(()),
    }
}

/// Width of the slot a child occupies inside `content`.
///
/// Auto stretches to the full content width; everything else resolves
/// against it, clamped to the child's min-width constraint.
fn slot_width(child: &dyn Element, content: Rectangle) -> i32 {
    let style = child.style();
    let width = resolve_size(
        style.width(),
        content.width(),
        content.width(),
        child.min_width(content.height()),
        child.width_for(content.height()),
        Axis::Horizontal,
    );
    clamp_min(width, style.min_width(), content.width(), Axis::Horizontal).min(content.width())
}

/// Height of a child laid out at `width`, honoring its min-height.
fn slot_height(child: &dyn Element, width: i32, content: Rectangle) -> i32 {
    let style = child.style();
    let height = resolve_size(
        style.height(),
        content.height(),
        child.height_for(width),
        child.min_height(width),
        child.height_for(width),
        Axis::Vertical,
    );
    clamp_min(height, style.min_height(), content.height(), Axis::Vertical)
}

pub(crate) fn render_block_children(
    children: &[Box<dyn Element>],
    style: &StyleBlock,
    screen: &mut Screen,
    content: Rectangle,
    ctx: &LayoutContext,
) -> Result<(), LayoutError> {
    let overflow = style.overflow();
    let mut y = content.lower_y();

    for child in children {
        if child.style().display() == Display::None {
            continue;
        }
        if y > content.higher_y() && overflow == Overflow::Hidden {
            break;
        }

        let cw = slot_width(child.as_ref(), content);
        let ch = slot_height(child.as_ref(), cw, content);
        let x = content.lower_x() + align_offset_h(style.align_h(), content.width(), cw);

        let child_ctx = ctx.descend(child.tag())?;
        child.render(
            screen,
            Rectangle::new(x, y, x + cw - 1, y + ch - 1),
            &child_ctx,
        )?;

        y += ch;
    }
    Ok(())
}

fn render_flex_row(
    children: &[Box<dyn Element>],
    style: &StyleBlock,
    screen: &mut Screen,
    content: Rectangle,
    ctx: &LayoutContext,
) -> Result<(), LayoutError> {
    let visible: Vec<&Box<dyn Element>> = children
        .iter()
        .filter(|c| c.style().display() != Display::None)
        .collect();
    if visible.is_empty() {
        return Ok(());
    }

    let natural: Vec<i32> = visible
        .iter()
        .map(|c| c.width_for(content.height()))
        .collect();
    let gaps = FLEX_GAP * (visible.len() as i32 - 1);
    let total: i32 = natural.iter().sum::<i32>() + gaps;

    if total <= content.width() {
        return place_row(&visible, &natural, style, screen, content, ctx, FLEX_GAP);
    }

    if style.flex_wrap() {
        return place_row_wrapped(&visible, style, screen, content, ctx);
    }

    // Overflowing un-wrapped row: floor children at their minimums and
    // distribute the rest by flex-grow weight.
    let minimums: Vec<i32> = visible
        .iter()
        .map(|c| c.min_width(content.height()))
        .collect();
    let weights: Vec<u16> = visible.iter().map(|c| c.style().flex_grow()).collect();
    let sizes = distribute_flex(content.width(), &minimums, &weights);
    place_row(&visible, &sizes, style, screen, content, ctx, 0)
}

/// Lay a single row of children left-to-right (or right-to-left for the
/// reverse direction) at the given widths.
fn place_row(
    children: &[&Box<dyn Element>],
    widths: &[i32],
    style: &StyleBlock,
    screen: &mut Screen,
    content: Rectangle,
    ctx: &LayoutContext,
    gap: i32,
) -> Result<(), LayoutError> {
    let reverse = style.flex_direction().is_reverse();
    let mut x = content.lower_x();

    let order: Vec<usize> = if reverse {
        (0..children.len()).rev().collect()
    } else {
        (0..children.len()).collect()
    };

    for i in order {
        let child = children[i];
        let cw = widths[i].max(1);
        let ch = slot_height(child.as_ref(), cw, content).min(content.height());
        let v = align_offset_v(style.align_v(), content.height(), ch);
        let y = content.lower_y() + v;

        let child_ctx = ctx.descend(child.tag())?;
        child.render(
            screen,
            Rectangle::new(x, y, x + cw - 1, y + ch - 1),
            &child_ctx,
        )?;

        x += cw + gap;
    }
    Ok(())
}

/// Wrap children onto new lines whenever the remaining row width is smaller
/// than the next child's minimum width.
fn place_row_wrapped(
    children: &[&Box<dyn Element>],
    style: &StyleBlock,
    screen: &mut Screen,
    content: Rectangle,
    ctx: &LayoutContext,
) -> Result<(), LayoutError> {
    let mut x = content.lower_x();
    let mut y = content.lower_y();
    let mut row_height = 0;

    for child in children {
        let min = child.min_width(content.height());
        let remaining = content.higher_x() - x + 1;
        if min > remaining && x > content.lower_x() {
            y += row_height.max(1);
            x = content.lower_x();
            row_height = 0;
        }
        if y > content.higher_y() && style.overflow() == Overflow::Hidden {
            break;
        }

        let cw = child
            .width_for(content.height())
            .min(content.width())
            .max(1);
        let ch = slot_height(child.as_ref(), cw, content);

        let child_ctx = ctx.descend(child.tag())?;
        child.render(
            screen,
            Rectangle::new(x, y, x + cw - 1, y + ch - 1),
            &child_ctx,
        )?;

        row_height = row_height.max(ch);
        x += cw + FLEX_GAP;
    }
    Ok(())
}

fn render_flex_column(
    children: &[Box<dyn Element>],
    style: &StyleBlock,
    screen: &mut Screen,
    content: Rectangle,
    ctx: &LayoutContext,
) -> Result<(), LayoutError> {
    let visible: Vec<&Box<dyn Element>> = children
        .iter()
        .filter(|c| c.style().display() != Display::None)
        .collect();
    if visible.is_empty() {
        return Ok(());
    }

    let natural: Vec<i32> = visible
        .iter()
        .map(|c| c.height_for(content.width()))
        .collect();
    let gaps = FLEX_GAP * (visible.len() as i32 - 1);
    let total: i32 = natural.iter().sum::<i32>() + gaps;

    let (sizes, gap) = if total <= content.height() {
        (natural, FLEX_GAP)
    } else {
        let minimums: Vec<i32> = visible
            .iter()
            .map(|c| c.min_height(content.width()))
            .collect();
        let weights: Vec<u16> = visible.iter().map(|c| c.style().flex_grow()).collect();
        (distribute_flex(content.height(), &minimums, &weights), 0)
    };

    let reverse = style.flex_direction().is_reverse();
    let order: Vec<usize> = if reverse {
        (0..visible.len()).rev().collect()
    } else {
        (0..visible.len()).collect()
    };

    let mut y = content.lower_y();
    for i in order {
        let child = visible[i];
        let ch = sizes[i].max(1);
        let cw = slot_width(child.as_ref(), content);
        let x = content.lower_x() + align_offset_h(style.align_h(), content.width(), cw);

        let child_ctx = ctx.descend(child.tag())?;
        child.render(
            screen,
            Rectangle::new(x, y, x + cw - 1, y + ch - 1),
            &child_ctx,
        )?;

        y += ch + gap;
    }
    Ok(())
}

/// Block layout with a fixed-width marker gutter per item.
pub(crate) fn render_list_children(
    children: &[Box<dyn Element>],
    style: &StyleBlock,
    screen: &mut Screen,
    content: Rectangle,
    ctx: &LayoutContext,
) -> Result<(), LayoutError> {
    let marker = style.list_marker();
    let gutter = list_gutter(&marker);
    let z = style.z_index();
    let marker_style = crate::style::CellStyle::new(style.color(), style.background_color());

    let item_area = Rectangle::new(
        (content.lower_x() + gutter).min(content.higher_x()),
        content.lower_y(),
        content.higher_x(),
        content.higher_y(),
    );

    let overflow = style.overflow();
    let mut y = content.lower_y();

    for child in children {
        if child.style().display() == Display::None {
            continue;
        }
        if y > content.higher_y() && overflow == Overflow::Hidden {
            break;
        }

        screen.draw_text_line(content.lower_x(), y, &marker, marker_style, content, z);

        let cw = slot_width(child.as_ref(), item_area);
        let ch = slot_height(child.as_ref(), cw, item_area);

        let child_ctx = ctx.descend(child.tag())?;
        child.render(
            screen,
            Rectangle::new(item_area.lower_x(), y, item_area.lower_x() + cw - 1, y + ch - 1),
            &child_ctx,
        )?;

        y += ch;
    }
    Ok(())
}

/// Gutter width reserved for the list marker: the marker glyphs plus one
/// separating space.
pub(crate) fn list_gutter(marker: &str) -> i32 {
    visible_width(marker) as i32 + 1
}

// =============================================================================
// Shared container measurement
// =============================================================================

pub(crate) fn container_width(
    children: &[Box<dyn Element>],
    style: &StyleBlock,
    max_height: i32,
) -> i32 {
    let display = style.display();
    if display == Display::None {
        return 0;
    }

    let visible = || children.iter().filter(|c| c.style().display() != Display::None);
    let content: i32 = match display {
        Display::Block => visible().map(|c| c.width_for(max_height)).max().unwrap_or(0),
        Display::Flex => {
            if style.flex_direction().is_row() {
                let n = visible().count() as i32;
                visible().map(|c| c.width_for(max_height)).sum::<i32>() + FLEX_GAP * (n - 1).max(0)
            } else {
                visible().map(|c| c.width_for(max_height)).max().unwrap_or(0)
            }
        }
        Display::List => {
            let widest = visible().map(|c| c.width_for(max_height)).max().unwrap_or(0);
            widest + list_gutter(&style.list_marker())
        }
        Display::None => 0,
    };

    content + horizontal_chrome(&style.margin(), &style.padding(), &style.border(), 0)
}

pub(crate) fn container_min_width(
    children: &[Box<dyn Element>],
    style: &StyleBlock,
    max_height: i32,
) -> i32 {
    let display = style.display();
    if display == Display::None {
        return 0;
    }

    let visible = || children.iter().filter(|c| c.style().display() != Display::None);
    let content: i32 = match display {
        Display::Block => visible().map(|c| c.min_width(max_height)).max().unwrap_or(0),
        Display::Flex => {
            if style.flex_direction().is_row() {
                if style.flex_wrap() {
                    // A wrapping row can narrow to its widest single child.
                    visible().map(|c| c.min_width(max_height)).max().unwrap_or(0)
                } else {
                    let n = visible().count() as i32;
                    visible().map(|c| c.min_width(max_height)).sum::<i32>()
                        + FLEX_GAP * (n - 1).max(0)
                }
            } else {
                visible().map(|c| c.min_width(max_height)).max().unwrap_or(0)
            }
        }
        Display::List => {
            let widest = visible().map(|c| c.min_width(max_height)).max().unwrap_or(0);
            widest + list_gutter(&style.list_marker())
        }
        Display::None => 0,
    };

    content + horizontal_chrome(&style.margin(), &style.padding(), &style.border(), 0)
}

pub(crate) fn container_height(
    children: &[Box<dyn Element>],
    style: &StyleBlock,
    max_width: i32,
) -> i32 {
    let display = style.display();
    if display == Display::None {
        return 0;
    }

    let chrome_h = horizontal_chrome(&style.margin(), &style.padding(), &style.border(), max_width);
    let chrome_v = vertical_chrome(&style.margin(), &style.padding(), &style.border(), max_width);
    let inner_width = (max_width - chrome_h).max(0);

    let visible = || children.iter().filter(|c| c.style().display() != Display::None);
    let content: i32 = match display {
        Display::Block => visible().map(|c| c.height_for(inner_width)).sum(),
        Display::Flex => {
            if style.flex_direction().is_row() {
                visible().map(|c| c.height_for(inner_width)).max().unwrap_or(0)
            } else {
                let n = visible().count() as i32;
                visible().map(|c| c.height_for(inner_width)).sum::<i32>()
                    + FLEX_GAP * (n - 1).max(0)
            }
        }
        Display::List => {
            let item_width = (inner_width - list_gutter(&style.list_marker())).max(0);
            visible().map(|c| c.height_for(item_width)).sum()
        }
        Display::None => 0,
    };

    content + chrome_v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Paragraph;
    use crate::style::{BorderStyle, Color, Dimension, StyleProperty};

    fn bordered_paragraph(text: &str) -> Box<dyn Element> {
        let mut p = Paragraph::new(text);
        p.style_mut()
            .set(StyleProperty::Border(BorderStyle::solid(Color::Default)));
        p.style_mut()
            .set(StyleProperty::Width(Dimension::Percent(100)));
        Box::new(p)
    }

    #[test]
    fn block_children_stack_with_full_width_borders() {
        // Two bordered 100%-width paragraphs in an 80x24 area: content
        // rectangles are 78 wide and as tall as the wrapped line count.
        let div = Div::with_children(vec![
            bordered_paragraph("hello world"),
            bordered_paragraph("second paragraph"),
        ]);

        let mut screen = Screen::new(80, 24);
        screen.begin_frame();
        let bounds = screen.bounds();
        div.render(&mut screen, bounds, &LayoutContext::default())
            .unwrap();

        // First paragraph: border at rows 0 and 2, text row 1 at column 1.
        assert_eq!(screen.get(0, 0).unwrap().ch(), Some('┌'));
        assert_eq!(screen.get(79, 0).unwrap().ch(), Some('┐'));
        assert_eq!(screen.get(1, 1).unwrap().ch(), Some('h'));
        assert_eq!(screen.get(0, 2).unwrap().ch(), Some('└'));

        // Second paragraph starts right below (row 3).
        assert_eq!(screen.get(0, 3).unwrap().ch(), Some('┌'));
        assert_eq!(screen.get(1, 4).unwrap().ch(), Some('s'));
    }

    #[test]
    fn display_none_child_is_skipped_entirely() {
        let mut hidden = Paragraph::new("invisible");
        hidden
            .style_mut()
            .set(StyleProperty::Display(Display::None));
        let div = Div::with_children(vec![Box::new(hidden), Box::new(Paragraph::new("shown"))]);

        let mut screen = Screen::new(20, 5);
        screen.begin_frame();
        let bounds = screen.bounds();
        div.render(&mut screen, bounds, &LayoutContext::default())
            .unwrap();

        // The visible paragraph takes the first row.
        assert_eq!(screen.get(0, 0).unwrap().ch(), Some('s'));
    }

    #[test]
    fn nesting_bound_is_a_typed_error() {
        fn nest(depth: usize) -> Box<dyn Element> {
            if depth == 0 {
                Box::new(Paragraph::new("leaf"))
            } else {
                Box::new(Div::with_children(vec![nest(depth - 1)]))
            }
        }

        let root = nest(5);
        let mut screen = Screen::new(20, 20);
        let bounds = screen.bounds();
        let err = root
            .render(&mut screen, bounds, &LayoutContext::root(3))
            .unwrap_err();
        assert!(matches!(err, LayoutError::NestingTooDeep { .. }));
    }

    #[test]
    fn container_measurements_follow_display_mode() {
        let div = Div::with_children(vec![
            Box::new(Paragraph::new("aaaa")),
            Box::new(Paragraph::new("bb")),
        ]);
        // Block width: widest child.
        assert_eq!(container_width(div.children(), div.style(), 10), 4);

        let mut flex = StyleBlock::new();
        flex.set(StyleProperty::Display(Display::Flex));
        // Flex row width: sum plus one gap.
        assert_eq!(container_width(div.children(), &flex, 10), 4 + 2 + 1);
    }

    #[test]
    fn list_gutter_reserves_marker_and_space() {
        assert_eq!(list_gutter("*"), 2);
        assert_eq!(list_gutter("->"), 3);
    }
}
