//! The input driver thread.
//!
//! One dedicated background thread blocks on raw stdin reads, runs the
//! decoder, and pushes every completed event onto a thread-safe queue. The
//! application tick thread drains the queue at tick start; handlers never
//! run on the reader thread, so a slow handler can never stall byte reading,
//! and decode order is the only ordering guarantee.
//!
//! Cancellation is cooperative: `stop` raises a flag the loop checks every
//! cycle. On the primary (TTY) path the thread notices the flag after its
//! current blocking read returns; on the compatibility path for redirected
//! input, reads are interleaved with a ~50 ms sleep whenever no data is
//! available, so the flag is observed within one poll interval.

use std::io::{self, IsTerminal, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use super::decoder::Decoder;
use super::event::InputEvent;

/// Sleep between polls when redirected input has no data.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Handle to the background input thread.
pub struct InputDriver {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputDriver {
    /// Spawn the reader thread. Returns the driver handle and the event
    /// queue receiver.
    pub fn spawn() -> io::Result<(Self, Receiver<InputEvent>)> {
        let (tx, rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("ember-input".to_string())
            .spawn(move || {
                let interactive = io::stdin().is_terminal();
                debug!(interactive, "input driver started");
                if interactive {
                    read_loop(&flag, &tx);
                } else {
                    read_loop_compat(&flag, &tx);
                }
                debug!("input driver stopped");
            })?;

        Ok((
            Self {
                running,
                handle: Some(handle),
            },
            rx,
        ))
    }

    /// Request cooperative shutdown. The thread observes the flag on its
    /// next read-or-poll cycle; no thread is ever terminated forcibly.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        // The primary path may sit in a blocking read until one more byte
        // arrives; detaching is the cooperative contract, not a kill.
        if let Some(handle) = self.handle.take() {
            drop(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for InputDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Primary path: blocking reads from an interactive terminal.
fn read_loop(running: &AtomicBool, tx: &Sender<InputEvent>) {
    let mut decoder = Decoder::new();
    let mut buf = [0u8; 256];
    let stdin = io::stdin();

    while running.load(Ordering::SeqCst) {
        match stdin.lock().read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if !dispatch(&mut decoder, &buf[..n], tx) {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }

    for event in decoder.flush_pending() {
        let _ = tx.send(event);
    }
}

/// Compatibility path for redirected/non-TTY input: functionally equivalent
/// decoding, but reads are interleaved with a sleep backoff so the stop flag
/// is observed within one poll interval even when the stream is idle.
fn read_loop_compat(running: &AtomicBool, tx: &Sender<InputEvent>) {
    let mut decoder = Decoder::new();
    let mut buf = [0u8; 256];
    let stdin = io::stdin();
    let mut eof = false;

    while running.load(Ordering::SeqCst) {
        if eof {
            // Stalled prefixes will not complete once the stream is done.
            for event in decoder.flush_pending() {
                if tx.send(event).is_err() {
                    return;
                }
            }
            thread::sleep(POLL_INTERVAL);
            continue;
        }

        match stdin.lock().read(&mut buf) {
            Ok(0) => eof = true,
            Ok(n) => {
                if !dispatch(&mut decoder, &buf[..n], tx) {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => {
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

/// Decode a chunk and queue its events. Returns false when the receiver is
/// gone.
fn dispatch(decoder: &mut Decoder, bytes: &[u8], tx: &Sender<InputEvent>) -> bool {
    for event in decoder.feed(bytes) {
        if tx.send(event).is_err() {
            return false;
        }
    }
    true
}
