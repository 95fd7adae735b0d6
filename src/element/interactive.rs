//! Interactive widgets bound to the settings capability.
//!
//! Widgets never see validation internals: they hold a boxed [`Argument`]
//! and go through `get`/`set`/`reset`. The two implementations here cover
//! the widget needs and the tests; richer argument types belong to the
//! settings subsystem, not the toolkit.

use crate::error::LayoutError;
use crate::geometry::Rectangle;
use crate::input::{KeyCode, KeyEvent};
use crate::layout::{border_rect, content_rect, vertical_chrome, LayoutContext};
use crate::render::Screen;
use crate::style::{Attr, CellStyle, Display, StyleBlock};
use crate::text::visible_width;

use super::{Element, ElementInfo};

/// A value an interactive element can bind to.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Typed-value capability the settings subsystem exposes to widgets.
pub trait Argument: Send {
    fn get(&self) -> ArgValue;

    /// Store a value. Returns `false` when the value fails validation; the
    /// stored value is untouched in that case.
    fn set(&mut self, value: ArgValue) -> bool;

    /// Restore the default value.
    fn reset(&mut self);

    fn is_valid(&self, value: &ArgValue) -> bool;

    fn boxed_clone(&self) -> Box<dyn Argument>;
}

/// A boolean argument.
#[derive(Debug, Clone)]
pub struct BoolArgument {
    value: bool,
    default: bool,
}

impl BoolArgument {
    pub fn new(default: bool) -> Self {
        Self {
            value: default,
            default,
        }
    }
}

impl Argument for BoolArgument {
    fn get(&self) -> ArgValue {
        ArgValue::Bool(self.value)
    }

    fn set(&mut self, value: ArgValue) -> bool {
        match value {
            ArgValue::Bool(b) => {
                self.value = b;
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        self.value = self.default;
    }

    fn is_valid(&self, value: &ArgValue) -> bool {
        matches!(value, ArgValue::Bool(_))
    }

    fn boxed_clone(&self) -> Box<dyn Argument> {
        Box::new(self.clone())
    }
}

/// A string argument with an optional length bound.
#[derive(Debug, Clone)]
pub struct StringArgument {
    value: String,
    default: String,
    max_len: Option<usize>,
}

impl StringArgument {
    pub fn new(default: impl Into<String>) -> Self {
        let default = default.into();
        Self {
            value: default.clone(),
            default,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}

impl Argument for StringArgument {
    fn get(&self) -> ArgValue {
        ArgValue::Str(self.value.clone())
    }

    fn set(&mut self, value: ArgValue) -> bool {
        if !self.is_valid(&value) {
            return false;
        }
        let ArgValue::Str(s) = value else {
            return false;
        };
        self.value = s;
        true
    }

    fn reset(&mut self) {
        self.value = self.default.clone();
    }

    fn is_valid(&self, value: &ArgValue) -> bool {
        match value {
            ArgValue::Str(s) => self.max_len.is_none_or(|m| s.chars().count() <= m),
            _ => false,
        }
    }

    fn boxed_clone(&self) -> Box<dyn Argument> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Checkbox
// =============================================================================

/// `[x] label` toggle bound to a boolean argument.
pub struct Checkbox {
    info: ElementInfo,
    style: StyleBlock,
    label: String,
    argument: Box<dyn Argument>,
    focused: bool,
}

impl Checkbox {
    pub fn new(label: impl Into<String>, argument: Box<dyn Argument>) -> Self {
        Self {
            info: ElementInfo::default(),
            style: StyleBlock::new(),
            label: label.into(),
            argument,
            focused: false,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.argument.get(), ArgValue::Bool(true))
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.info.mark_updated();
        }
    }

    fn toggle(&mut self) {
        let next = !self.is_checked();
        if self.argument.set(ArgValue::Bool(next)) {
            self.info.mark_updated();
        }
    }
}

impl Element for Checkbox {
    fn tag(&self) -> &'static str {
        "checkbox"
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
        // "[x] " + label
        4 + visible_width(&self.label) as i32
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

        let mark = if self.is_checked() { 'x' } else { ' ' };
        let attrs = if self.focused { Attr::INVERSE } else { Attr::NONE };
        let style = CellStyle::new(self.style.color(), self.style.background_color())
            .with_attrs(attrs);

        let line = format!("[{mark}] {}", self.label);
        screen.draw_text_line(content.lower_x(), content.lower_y(), &line, style, content, z);
        Ok(())
    }

    fn on_key(&mut self, event: &KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        match event.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.toggle();
                true
            }
            _ => false,
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        if name.eq_ignore_ascii_case("label") {
            self.label = value.to_string();
            self.info.mark_updated();
            return true;
        }
        false
    }
}

// =============================================================================
// TextInput
// =============================================================================

/// Single-line editor bound to a string argument.
pub struct TextInput {
    info: ElementInfo,
    style: StyleBlock,
    argument: Box<dyn Argument>,
    focused: bool,
}

impl TextInput {
    pub fn new(argument: Box<dyn Argument>) -> Self {
        Self {
            info: ElementInfo::default(),
            style: StyleBlock::new(),
            argument,
            focused: false,
        }
    }

    pub fn value(&self) -> String {
        match self.argument.get() {
            ArgValue::Str(s) => s,
            other => panic!("text input bound to non-string argument: {other:?}"),
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.info.mark_updated();
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut String)) {
        let mut value = self.value();
        f(&mut value);
        if self.argument.set(ArgValue::Str(value)) {
            self.info.mark_updated();
        }
    }
}

impl Element for TextInput {
    fn tag(&self) -> &'static str {
        "input"
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
        // One trailing cell for the cursor position.
        visible_width(&self.value()) as i32 + 1
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

        let style = CellStyle::new(self.style.color(), self.style.background_color());
        let value = self.value();
        let used = screen.draw_text_line(
            content.lower_x(),
            content.lower_y(),
            &value,
            style,
            content,
            z,
        );

        if self.focused {
            screen.paint_cell(
                content.lower_x() + used,
                content.lower_y(),
                Some('_'),
                style.with_attrs(Attr::INVERSE),
                z,
            );
        }
        Ok(())
    }

    fn on_key(&mut self, event: &KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        match event.code {
            KeyCode::Char(c) => {
                self.edit(|v| v.push(c));
                true
            }
            KeyCode::Backspace => {
                self.edit(|v| {
                    v.pop();
                });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, Modifiers::NONE)
    }

    #[test]
    fn checkbox_toggles_through_the_argument() {
        let mut cb = Checkbox::new("opt", Box::new(BoolArgument::new(false)));
        cb.set_focused(true);
        assert!(!cb.is_checked());

        assert!(cb.on_key(&key(KeyCode::Char(' '))));
        assert!(cb.is_checked());
        assert!(cb.on_key(&key(KeyCode::Enter)));
        assert!(!cb.is_checked());
    }

    #[test]
    fn unfocused_checkbox_ignores_keys() {
        let mut cb = Checkbox::new("opt", Box::new(BoolArgument::new(false)));
        assert!(!cb.on_key(&key(KeyCode::Char(' '))));
        assert!(!cb.is_checked());
    }

    #[test]
    fn text_input_edits_through_the_argument() {
        let mut input = TextInput::new(Box::new(StringArgument::new("")));
        input.set_focused(true);

        input.on_key(&key(KeyCode::Char('h')));
        input.on_key(&key(KeyCode::Char('i')));
        assert_eq!(input.value(), "hi");

        input.on_key(&key(KeyCode::Backspace));
        assert_eq!(input.value(), "h");
    }

    #[test]
    fn string_argument_enforces_its_bound() {
        let mut input = TextInput::new(Box::new(StringArgument::new("").with_max_len(2)));
        input.set_focused(true);
        input.on_key(&key(KeyCode::Char('a')));
        input.on_key(&key(KeyCode::Char('b')));
        input.on_key(&key(KeyCode::Char('c'))); // rejected by validation
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn argument_reset_restores_the_default() {
        let mut arg = StringArgument::new("dflt");
        arg.set(ArgValue::Str("changed".into()));
        arg.reset();
        assert_eq!(arg.get(), ArgValue::Str("dflt".into()));
    }

    #[test]
    fn checkbox_renders_its_mark() {
        let cb = Checkbox::new("on", Box::new(BoolArgument::new(true)));
        let mut screen = Screen::new(10, 1);
        screen.begin_frame();
        let bounds = screen.bounds();
        cb.render(&mut screen, bounds, &LayoutContext::default())
            .unwrap();
        assert_eq!(screen.get(0, 0).unwrap().ch(), Some('['));
        assert_eq!(screen.get(1, 0).unwrap().ch(), Some('x'));
        assert_eq!(screen.get(4, 0).unwrap().ch(), Some('o'));
    }
}
