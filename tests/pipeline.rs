//! End-to-end pipeline tests: element tree -> layout -> cell buffer ->
//! diff -> escape output, plus decoder-to-tree event flow.

use ember_tui::{
    dispatch_key, load_str, visible_width, wrap_text, BorderStyle, Color, Decoder, Dimension,
    Display, Div, Element, InputEvent, KeyCode, LayoutContext, Paragraph, Registry, Screen,
    StyleBlock, StyleProperty, Stylesheet, TerminalWriter,
};

fn bordered_full_width(text: &str) -> Box<dyn Element> {
    let mut p = Paragraph::new(text);
    p.style_mut()
        .set(StyleProperty::Border(BorderStyle::solid(Color::Default)));
    p.style_mut()
        .set(StyleProperty::Width(Dimension::Percent(100)));
    Box::new(p)
}

#[test]
fn two_paragraphs_stack_into_78_wide_content_rects() {
    // An 80x24 area, two bordered 100%-width paragraphs under a Block div:
    // each content rectangle is 78 wide and as tall as its wrapped lines.
    let long = "the quick brown fox jumps over the lazy dog ".repeat(4);
    let root = Div::with_children(vec![
        bordered_full_width("short one"),
        bordered_full_width(long.trim()),
    ]);

    let mut screen = Screen::new(80, 24);
    screen.begin_frame();
    let bounds = screen.bounds();
    root.render(&mut screen, bounds, &LayoutContext::default())
        .unwrap();

    let expected_lines = wrap_text(long.trim(), 78).len();
    assert!(expected_lines > 1, "second paragraph must wrap");

    // First paragraph: 1 text line + 2 border rows.
    assert_eq!(screen.get(0, 0).unwrap().ch(), Some('┌'));
    assert_eq!(screen.get(1, 1).unwrap().ch(), Some('s'));
    assert_eq!(screen.get(0, 2).unwrap().ch(), Some('└'));

    // Second paragraph starts at row 3 and closes after its wrapped lines.
    assert_eq!(screen.get(0, 3).unwrap().ch(), Some('┌'));
    let second_bottom = 3 + expected_lines as i32 + 1;
    assert_eq!(screen.get(0, second_bottom).unwrap().ch(), Some('└'));

    // Every wrapped line fits the 78-cell content width.
    for line in wrap_text(long.trim(), 78) {
        assert!(visible_width(&line) <= 78);
    }
}

#[test]
fn identical_frames_produce_no_terminal_output() {
    let root = Div::with_children(vec![bordered_full_width("static content")]);
    let mut screen = Screen::new(40, 10);
    let mut writer = TerminalWriter::new();

    screen.begin_frame();
    let bounds = screen.bounds();
    root.render(&mut screen, bounds, &LayoutContext::default())
        .unwrap();
    let mut first = Vec::new();
    writer.write_frame(&screen.flush(), &mut first).unwrap();
    assert!(!first.is_empty());

    // Same tree, same frame: the diff is empty and nothing hits the wire.
    screen.begin_frame();
    let bounds = screen.bounds();
    root.render(&mut screen, bounds, &LayoutContext::default())
        .unwrap();
    let mut second = Vec::new();
    writer.write_frame(&screen.flush(), &mut second).unwrap();
    assert!(second.is_empty());
}

#[test]
fn resize_repaints_the_full_screen() {
    let root = Div::with_children(vec![bordered_full_width("resize me")]);
    let mut screen = Screen::new(40, 10);

    screen.begin_frame();
    let bounds = screen.bounds();
    root.render(&mut screen, bounds, &LayoutContext::default())
        .unwrap();
    screen.flush();

    screen.resize(50, 12);
    // Before any repaint the whole new grid is dirty.
    assert_eq!(screen.flush().len(), 50 * 12);
}

#[test]
fn document_stylesheet_and_input_drive_the_tree() {
    let registry = Registry::with_defaults();
    let mut root = load_str(
        r#"<div>
             <p id="greeting">hello</p>
             <input id="name"/>
           </div>"#,
        &registry,
    )
    .unwrap();

    let mut sheet = Stylesheet::new();
    sheet.add(
        "#greeting",
        StyleBlock::from_props([StyleProperty::Color(Color::GREEN)]),
    );
    sheet.apply(root.as_mut());
    assert_eq!(root.children()[0].style().color(), Color::GREEN);

    // Decoded keys dispatch into the tree (nothing focused: not consumed).
    let mut decoder = Decoder::new();
    for event in decoder.feed(b"hi") {
        if let InputEvent::Key(key) = event {
            assert!(!dispatch_key(root.as_mut(), &key));
            assert!(matches!(key.code, KeyCode::Char(_)));
        }
    }

    // The tree still renders after the cascade.
    let mut screen = Screen::new(30, 6);
    screen.begin_frame();
    let bounds = screen.bounds();
    root.render(&mut screen, bounds, &LayoutContext::default())
        .unwrap();
    assert_eq!(screen.get(0, 0).unwrap().ch(), Some('h'));
}

#[test]
fn flex_row_splits_the_width_between_children() {
    let mut style = StyleBlock::new();
    style.set(StyleProperty::Display(Display::Flex));

    let left = Paragraph::new("left column with plenty of words to wrap around");
    let right = Paragraph::new("right column also has quite a few words in it");
    let root =
        Div::with_children(vec![Box::new(left), Box::new(right)]).with_style(style);

    let mut screen = Screen::new(40, 8);
    screen.begin_frame();
    let bounds = screen.bounds();
    root.render(&mut screen, bounds, &LayoutContext::default())
        .unwrap();

    // Both columns painted something on the first row.
    assert_eq!(screen.get(0, 0).unwrap().ch(), Some('l'));
    let mut found_right = false;
    for x in 1..40 {
        if screen.get(x, 0).unwrap().ch() == Some('r') {
            found_right = true;
            break;
        }
    }
    assert!(found_right, "right column missing from the first row");
}
