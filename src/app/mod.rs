//! The application root: the registry context, the event queue, and the
//! tick loop.
//!
//! One background thread decodes input and fills the queue; the tick thread
//! drains it at the start of every tick, dispatches events into the element
//! tree, and runs the layout -> paint -> diff -> write pass. The cell
//! buffer is owned here and touched by the tick thread only.

mod config;
mod terminal;

pub use config::AppConfig;
pub use terminal::TerminalSession;

use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::dom::Stylesheet;
use crate::element::{dispatch_key, dispatch_mouse, take_tree_updated, Element, Registry};
use crate::error::AppError;
use crate::input::{InputDriver, InputEvent};
use crate::layout::LayoutContext;
use crate::render::{Screen, TerminalWriter};

/// Poll cadence for resize detection and stop-flag observation in the lazy
/// loop.
const LAZY_POLL: Duration = Duration::from_millis(100);

/// An application owning a UI tree and the terminal.
pub struct App {
    config: AppConfig,
    registry: Registry,
    stylesheet: Stylesheet,
    root: Box<dyn Element>,
    screen: Screen,
    writer: TerminalWriter,
    running: bool,
}

impl App {
    pub fn new(root: Box<dyn Element>, config: AppConfig) -> Self {
        Self {
            config,
            registry: Registry::with_defaults(),
            stylesheet: Stylesheet::new(),
            root,
            screen: Screen::new(0, 0),
            writer: TerminalWriter::new(),
            running: false,
        }
    }

    /// The element registry used for document loading.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn set_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.stylesheet = stylesheet;
    }

    pub fn root(&self) -> &dyn Element {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> &mut dyn Element {
        self.root.as_mut()
    }

    /// Stop after the current tick.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Run until stopped. Sets up the terminal and the input thread, then
    /// ticks until the interrupt combination arrives or `stop` is called.
    pub fn run(&mut self) -> Result<(), AppError> {
        let mut session = TerminalSession::enter_fullscreen()?;
        let (mut driver, events) = InputDriver::spawn()?;

        let (w, h) = TerminalSession::size()?;
        self.screen = Screen::new(w, h);
        self.stylesheet.apply(self.root.as_mut());
        self.running = true;

        // First frame immediately.
        self.render_frame()?;

        let result = if self.config.lazy_render {
            self.run_lazy(&events)
        } else {
            self.run_dynamic(&events)
        };

        driver.stop();
        session.exit()?;
        result
    }

    /// Lazy mode: block on the queue, render only after events (or a
    /// resize noticed while polling).
    fn run_lazy(&mut self, events: &Receiver<InputEvent>) -> Result<(), AppError> {
        while self.running {
            match events.recv_timeout(LAZY_POLL) {
                Ok(event) => {
                    self.handle_event(event);
                    // Drain whatever arrived with it.
                    while let Ok(more) = events.try_recv() {
                        self.handle_event(more);
                    }
                    take_tree_updated(self.root.as_mut());
                    self.render_frame()?;
                }
                Err(RecvTimeoutError::Timeout) => {
                    if self.resized()? {
                        self.render_frame()?;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        Ok(())
    }

    /// Dynamic mode: drain the queue every cycle, render on the frame-rate
    /// cadence.
    fn run_dynamic(&mut self, events: &Receiver<InputEvent>) -> Result<(), AppError> {
        let min_delta = Duration::from_millis(1000 / self.config.max_updates_per_second.max(1) as u64);
        let mut last_frame = Instant::now();

        while self.running {
            while let Ok(event) = events.try_recv() {
                self.handle_event(event);
            }
            if !self.running {
                break;
            }

            if last_frame.elapsed() >= min_delta {
                self.resized()?;
                take_tree_updated(self.root.as_mut());
                self.render_frame()?;
                last_frame = Instant::now();
            } else {
                std::thread::sleep(Duration::from_millis(2));
            }
        }
        Ok(())
    }

    /// Dispatch one queued event into the tree.
    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => {
                if self.config.interrupt == Some(key) {
                    debug!("interrupt combination received");
                    self.running = false;
                    return;
                }
                dispatch_key(self.root.as_mut(), &key);
            }
            InputEvent::Mouse(mouse) => {
                dispatch_mouse(self.root.as_mut(), &mouse);
            }
            // Focus, paste and terminal reports have no default tree
            // behavior; applications observe them via their own elements.
            _ => {}
        }
    }

    /// Rebuild the cell buffer when the terminal size changed. Every cell
    /// comes back dirty, so the next flush repaints the whole screen.
    fn resized(&mut self) -> Result<bool, AppError> {
        let (w, h) = TerminalSession::size()?;
        if w != self.screen.width() || h != self.screen.height() {
            debug!(width = w, height = h, "terminal resized");
            self.screen.resize(w, h);
            return Ok(true);
        }
        Ok(false)
    }

    /// One layout -> paint -> diff -> write pass.
    fn render_frame(&mut self) -> Result<(), AppError> {
        self.screen.begin_frame();
        let bounds = self.screen.bounds();
        let ctx = LayoutContext::root(self.config.max_nesting);
        self.root.render(&mut self.screen, bounds, &ctx)?;

        let changes = self.screen.flush();
        if !changes.is_empty() {
            let mut stdout = io::stdout().lock();
            self.writer
                .write_frame(&changes, &mut stdout)
                .map_err(AppError::Io)?;
        }
        Ok(())
    }
}
