//! Decoded input event payloads.
//!
//! All payloads are immutable values. `WinOpsResponse` is a sum type over the
//! seven window-operations report kinds; reading it through the accessor of
//! another variant fails loudly instead of coercing, and exhaustive `match`
//! is the preferred way to consume it.

use crate::error::InputError;
use crate::geometry::Size;

bitflags::bitflags! {
    /// Keyboard/mouse modifier keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// A key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Null,
}

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }
}

/// What a mouse event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    LeftPress,
    MiddlePress,
    RightPress,
    LeftRelease,
    MiddleRelease,
    RightRelease,
    /// Legacy-encoding release: the protocol does not say which button.
    Release,
    LeftDrag,
    MiddleDrag,
    RightDrag,
    Move,
    WheelUp,
    WheelDown,
    Unknown,
}

/// A decoded mouse event in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseKind,
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Whether this is any press kind.
    pub fn is_press(&self) -> bool {
        matches!(
            self.kind,
            MouseKind::LeftPress | MouseKind::MiddlePress | MouseKind::RightPress
        )
    }

    /// Whether this is any release kind.
    pub fn is_release(&self) -> bool {
        matches!(
            self.kind,
            MouseKind::LeftRelease
                | MouseKind::MiddleRelease
                | MouseKind::RightRelease
                | MouseKind::Release
        )
    }
}

/// A window-operations report from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinOpsResponse {
    IconLabel(String),
    WinTitle(String),
    /// `true` = window open/de-iconified.
    WinState(bool),
    WinPos { x: i32, y: i32 },
    WinSizePx(Size),
    WinSize(Size),
    ScrSize(Size),
}

impl WinOpsResponse {
    fn kind_name(&self) -> &'static str {
        match self {
            WinOpsResponse::IconLabel(_) => "icon label",
            WinOpsResponse::WinTitle(_) => "window title",
            WinOpsResponse::WinState(_) => "window state",
            WinOpsResponse::WinPos { .. } => "window position",
            WinOpsResponse::WinSizePx(_) => "window pixel size",
            WinOpsResponse::WinSize(_) => "window size",
            WinOpsResponse::ScrSize(_) => "screen size",
        }
    }

    fn wrong(&self, expected: &'static str) -> InputError {
        InputError::WrongResponseKind {
            expected,
            actual: self.kind_name(),
        }
    }

    pub fn as_icon_label(&self) -> Result<&str, InputError> {
        match self {
            WinOpsResponse::IconLabel(s) => Ok(s),
            other => Err(other.wrong("icon label")),
        }
    }

    pub fn as_win_title(&self) -> Result<&str, InputError> {
        match self {
            WinOpsResponse::WinTitle(s) => Ok(s),
            other => Err(other.wrong("window title")),
        }
    }

    pub fn as_win_state(&self) -> Result<bool, InputError> {
        match self {
            WinOpsResponse::WinState(open) => Ok(*open),
            other => Err(other.wrong("window state")),
        }
    }

    pub fn as_win_pos(&self) -> Result<(i32, i32), InputError> {
        match self {
            WinOpsResponse::WinPos { x, y } => Ok((*x, *y)),
            other => Err(other.wrong("window position")),
        }
    }

    pub fn as_win_size_px(&self) -> Result<Size, InputError> {
        match self {
            WinOpsResponse::WinSizePx(s) => Ok(*s),
            other => Err(other.wrong("window pixel size")),
        }
    }

    pub fn as_win_size(&self) -> Result<Size, InputError> {
        match self {
            WinOpsResponse::WinSize(s) => Ok(*s),
            other => Err(other.wrong("window size")),
        }
    }

    pub fn as_scr_size(&self) -> Result<Size, InputError> {
        match self {
            WinOpsResponse::ScrSize(s) => Ok(*s),
            other => Err(other.wrong("screen size")),
        }
    }
}

/// A DEC private-mode report (`ESC [ ? mode ; kind $ y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecReqResponse {
    pub mode: i32,
    pub kind: i32,
}

/// Any decoded input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    FocusIn,
    FocusOut,
    Paste(String),
    WinOps(WinOpsResponse),
    DecReq(DecReqResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_accessor_fails_loudly() {
        let response = WinOpsResponse::WinState(true);
        assert_eq!(response.as_win_state().unwrap(), true);

        let err = response.as_win_size().unwrap_err();
        assert_eq!(
            err,
            InputError::WrongResponseKind {
                expected: "window size",
                actual: "window state",
            }
        );
    }

    #[test]
    fn accessors_return_their_payloads() {
        assert_eq!(
            WinOpsResponse::WinPos { x: 4, y: 9 }.as_win_pos().unwrap(),
            (4, 9)
        );
        assert_eq!(
            WinOpsResponse::ScrSize(Size::new(1920, 1080))
                .as_scr_size()
                .unwrap(),
            Size::new(1920, 1080)
        );
        assert_eq!(
            WinOpsResponse::IconLabel("term".into())
                .as_icon_label()
                .unwrap(),
            "term"
        );
    }
}
