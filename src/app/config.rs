//! Application configuration.

use crate::input::{KeyCode, KeyEvent, Modifiers};
use crate::layout::DEFAULT_MAX_NESTING;

/// Tunables of the application loop.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Render only after input events instead of on a timer tick.
    pub lazy_render: bool,
    /// Frame-rate cap for dynamic rendering.
    pub max_updates_per_second: u32,
    /// Element-tree depth bound.
    pub max_nesting: u32,
    /// Key combination that stops the application. `None` disables the
    /// built-in interrupt.
    pub interrupt: Option<KeyEvent>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lazy_render: false,
            max_updates_per_second: 30,
            max_nesting: DEFAULT_MAX_NESTING,
            interrupt: Some(KeyEvent::new(KeyCode::Char('c'), Modifiers::CTRL)),
        }
    }
}

impl AppConfig {
    /// Lazy preset: render only when something happened.
    pub fn lazy() -> Self {
        Self {
            lazy_render: true,
            ..Self::default()
        }
    }
}
