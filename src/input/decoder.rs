//! Byte-oriented decoder for terminal input sequences.
//!
//! Consumes a raw byte stream and produces typed events: plain keys, legacy
//! (X10/UTF-8) and SGR mouse reports, focus in/out, bracketed paste,
//! window-operations responses, and DEC private-mode reports. The machine
//! holds partial sequences across feeds and never backtracks beyond the
//! lookahead the escape grammar itself requires.
//!
//! Error policy: a malformed field inside a sequence is logged and the
//! in-flight event is dropped; decoding resumes at the next byte. A bare
//! Escape keypress is indistinguishable from a sequence start until the next
//! byte arrives — when the byte after ESC is not a known introducer the
//! decoder emits a literal Escape key and replays that byte on its own.

use tracing::warn;

use super::event::{
    DecReqResponse, InputEvent, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseKind,
    WinOpsResponse,
};
use crate::geometry::Size;

const ESC: u8 = 0x1B;
/// Terminator of the window-ops OSC replies (`BEL` also accepted).
const OSC_END: u8 = 0x0F;
/// Literal terminator of a bracketed paste.
const PASTE_END: &[u8] = b"\x1b[201~";

enum Step {
    /// Consumed bytes; zero or more events were pushed.
    Consumed,
    /// The buffer holds the prefix of a sequence; wait for more bytes.
    Incomplete,
}

/// Incremental input decoder.
#[derive(Debug, Default)]
pub struct Decoder {
    buf: Vec<u8>,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed raw bytes; returns every event completed by them, in decode
    /// order.
    pub fn feed(&mut self, data: &[u8]) -> Vec<InputEvent> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();

        while !self.buf.is_empty() {
            match self.parse_one(&mut events) {
                Step::Consumed => {}
                Step::Incomplete => break,
            }
        }

        events
    }

    /// Whether a partial sequence is buffered.
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Drain a stalled partial sequence as literal keys. Call when no more
    /// input is coming (timeout or stream end) and a prefix is still held.
    pub fn flush_pending(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for byte in std::mem::take(&mut self.buf) {
            let code = if byte == ESC {
                KeyCode::Escape
            } else {
                KeyCode::Char(byte as char)
            };
            events.push(InputEvent::Key(KeyEvent::plain(code)));
        }
        events
    }

    #[inline]
    fn consume(&mut self, n: usize) {
        self.buf.drain(..n);
    }

    fn parse_one(&mut self, events: &mut Vec<InputEvent>) -> Step {
        match self.buf[0] {
            ESC => self.parse_escape(events),
            0x80.. => self.parse_utf8(events),
            byte => {
                self.consume(1);
                if let Some(key) = plain_key(byte) {
                    events.push(InputEvent::Key(key));
                }
                Step::Consumed
            }
        }
    }

    fn parse_escape(&mut self, events: &mut Vec<InputEvent>) -> Step {
        if self.buf.len() < 2 {
            return Step::Incomplete;
        }
        match self.buf[1] {
            b']' => self.parse_osc(events),
            b'[' => self.parse_csi(events),
            _ => {
                // Bare Escape keypress: emit it, replay the following byte
                // through the idle state as its own key.
                self.consume(1);
                events.push(InputEvent::Key(KeyEvent::plain(KeyCode::Escape)));
                Step::Consumed
            }
        }
    }

    /// `ESC ] <body> \x0f` — classified by the first body letter.
    fn parse_osc(&mut self, events: &mut Vec<InputEvent>) -> Step {
        let Some(end) = self.buf[2..]
            .iter()
            .position(|&b| b == OSC_END || b == 0x07)
            .map(|p| p + 2)
        else {
            return Step::Incomplete;
        };

        let body = String::from_utf8_lossy(&self.buf[2..end]).into_owned();
        self.consume(end + 1);

        match body.as_bytes().first() {
            Some(b'L') => events.push(InputEvent::WinOps(WinOpsResponse::IconLabel(
                body[1..].to_string(),
            ))),
            Some(b'l') => events.push(InputEvent::WinOps(WinOpsResponse::WinTitle(
                body[1..].to_string(),
            ))),
            _ => warn!(body = %body, "unclassified OSC response dropped"),
        }
        Step::Consumed
    }

    fn parse_csi(&mut self, events: &mut Vec<InputEvent>) -> Step {
        if self.buf.len() < 3 {
            return Step::Incomplete;
        }

        match self.buf[2] {
            b'O' => {
                self.consume(3);
                events.push(InputEvent::FocusOut);
                Step::Consumed
            }
            b'I' => {
                self.consume(3);
                events.push(InputEvent::FocusIn);
                Step::Consumed
            }
            b'M' => self.parse_legacy_mouse(events),
            b'<' => self.parse_sgr_mouse(events),
            b'1' => {
                self.consume(3);
                events.push(InputEvent::WinOps(WinOpsResponse::WinState(true)));
                Step::Consumed
            }
            b'2' => self.parse_two(events),
            d @ (b'3' | b'4' | b'8' | b'9') => {
                if self.buf.len() < 4 {
                    return Step::Incomplete;
                }
                if self.buf[3] == b';' {
                    self.parse_win_response(d, events)
                } else {
                    // No `;`-payload follows, so this is an ordinary key
                    // sequence such as `ESC [ 3 ~`.
                    self.parse_csi_key(events)
                }
            }
            b'?' => self.parse_dec_response(events),
            _ => self.parse_csi_key(events),
        }
    }

    /// `ESC [ M b x y` — legacy X10/UTF-8 mouse report.
    fn parse_legacy_mouse(&mut self, events: &mut Vec<InputEvent>) -> Step {
        if self.buf.len() < 6 {
            return Step::Incomplete;
        }
        let raw = self.buf[3] as i32 - 32;
        let x = remap_coordinate(self.buf[4]);
        let y = remap_coordinate(self.buf[5]);
        self.consume(6);

        let (kind, modifiers) = decompose_mouse(raw, true);
        events.push(InputEvent::Mouse(MouseEvent {
            kind,
            x,
            y,
            modifiers,
        }));
        Step::Consumed
    }

    /// `ESC [ < b ; x ; y (M|m)` — SGR extended mouse report.
    fn parse_sgr_mouse(&mut self, events: &mut Vec<InputEvent>) -> Step {
        let Some(end) = self.buf[3..]
            .iter()
            .position(|&b| b == b'M' || b == b'm')
            .map(|p| p + 3)
        else {
            return Step::Incomplete;
        };

        let press = self.buf[end] == b'M';
        let params = String::from_utf8_lossy(&self.buf[3..end]).into_owned();
        self.consume(end + 1);

        let mut fields = params.split(';');
        let Some(raw) = fields.next().and_then(|f| f.parse::<i32>().ok()) else {
            warn!(params = %params, "faulty mouse event type field, event dropped");
            return Step::Consumed;
        };
        let Some(x) = fields.next().and_then(|f| f.parse::<i32>().ok()) else {
            warn!(params = %params, "faulty mouse event x coordinate, event dropped");
            return Step::Consumed;
        };
        let Some(y) = fields.next().and_then(|f| f.parse::<i32>().ok()) else {
            warn!(params = %params, "faulty mouse event y coordinate, event dropped");
            return Step::Consumed;
        };

        let (kind, modifiers) = decompose_mouse(raw, press);
        events.push(InputEvent::Mouse(MouseEvent {
            kind,
            // SGR coordinates are 1-based on the wire.
            x: (x - 1).max(0),
            y: (y - 1).max(0),
            modifiers,
        }));
        Step::Consumed
    }

    /// `ESC [ 2` then `0` (paste start) or `t` (window iconified).
    fn parse_two(&mut self, events: &mut Vec<InputEvent>) -> Step {
        if self.buf.len() < 4 {
            return Step::Incomplete;
        }
        match self.buf[3] {
            b'0' => self.parse_paste(events),
            b't' => {
                self.consume(4);
                events.push(InputEvent::WinOps(WinOpsResponse::WinState(false)));
                Step::Consumed
            }
            other => {
                warn!(byte = other, "unexpected byte after CSI 2, sequence dropped");
                self.consume(4);
                Step::Consumed
            }
        }
    }

    /// `ESC [ 2 0 0 ~ <text> ESC [ 2 0 1 ~` — bracketed paste.
    ///
    /// The three framing bytes after `ESC [ 2` are skipped; everything up to
    /// the literal end marker is the pasted text.
    fn parse_paste(&mut self, events: &mut Vec<InputEvent>) -> Step {
        const CONTENT_START: usize = 6; // ESC [ 2 + three framing bytes

        if self.buf.len() < CONTENT_START {
            return Step::Incomplete;
        }
        let Some(end) = find_subsequence(&self.buf[CONTENT_START..], PASTE_END)
            .map(|p| p + CONTENT_START)
        else {
            return Step::Incomplete;
        };

        let text = String::from_utf8_lossy(&self.buf[CONTENT_START..end]).into_owned();
        self.consume(end + PASTE_END.len());
        events.push(InputEvent::Paste(text));
        Step::Consumed
    }

    /// `ESC [ d ; a ; b t` for d in 3/4/8/9 — window-operations responses.
    /// The 4/8/9 replies carry height before width on the wire.
    fn parse_win_response(&mut self, discriminator: u8, events: &mut Vec<InputEvent>) -> Step {
        let Some(end) = self.buf[3..].iter().position(|&b| b == b't').map(|p| p + 3) else {
            return Step::Incomplete;
        };

        // Skip the leading ';' of the payload.
        let payload = String::from_utf8_lossy(&self.buf[4..end]).into_owned();
        self.consume(end + 1);

        let mut fields = payload.split(';');
        let first = fields.next().and_then(|f| f.parse::<i32>().ok());
        let second = fields.next().and_then(|f| f.parse::<i32>().ok());
        let (Some(first), Some(second)) = (first, second) else {
            warn!(payload = %payload, "malformed window-ops response, event dropped");
            return Step::Consumed;
        };

        let response = match discriminator {
            b'3' => WinOpsResponse::WinPos { x: first, y: second },
            b'4' => WinOpsResponse::WinSizePx(Size::new(second, first)),
            b'8' => WinOpsResponse::WinSize(Size::new(second, first)),
            _ => WinOpsResponse::ScrSize(Size::new(second, first)),
        };
        events.push(InputEvent::WinOps(response));
        Step::Consumed
    }

    /// `ESC [ ? <mode> ; <kind> $ y` — DEC private-mode report.
    fn parse_dec_response(&mut self, events: &mut Vec<InputEvent>) -> Step {
        let Some(semi) = self.buf[3..].iter().position(|&b| b == b';').map(|p| p + 3) else {
            return Step::Incomplete;
        };
        let Some(dollar) = self.buf[semi..].iter().position(|&b| b == b'$').map(|p| p + semi)
        else {
            return Step::Incomplete;
        };
        if dollar + 1 >= self.buf.len() {
            return Step::Incomplete; // trailing 'y' not here yet
        }

        let mode_raw = String::from_utf8_lossy(&self.buf[3..semi]).into_owned();
        let kind_raw = String::from_utf8_lossy(&self.buf[semi + 1..dollar]).into_owned();
        self.consume(dollar + 2); // through the trailing 'y'

        let Ok(mode) = mode_raw.trim().parse::<i32>() else {
            warn!(mode = %mode_raw, "invalid mode in DEC response, event dropped");
            return Step::Consumed;
        };
        let Ok(kind) = kind_raw.trim().parse::<i32>() else {
            warn!(kind = %kind_raw, "invalid type in DEC response, event dropped");
            return Step::Consumed;
        };

        events.push(InputEvent::DecReq(DecReqResponse { mode, kind }));
        Step::Consumed
    }

    /// Ordinary CSI key sequences (arrows, navigation, function keys).
    fn parse_csi_key(&mut self, events: &mut Vec<InputEvent>) -> Step {
        let Some(end) = self.buf[2..]
            .iter()
            .position(|&b| (0x40..=0x7E).contains(&b))
            .map(|p| p + 2)
        else {
            return Step::Incomplete;
        };

        let final_byte = self.buf[end];
        let params: Vec<i32> = String::from_utf8_lossy(&self.buf[2..end])
            .split(';')
            .filter_map(|p| p.parse().ok())
            .collect();
        self.consume(end + 1);

        let modifiers = params
            .get(1)
            .copied()
            .map(csi_modifiers)
            .unwrap_or(Modifiers::NONE);

        let code = match final_byte {
            b'A' => Some(KeyCode::Up),
            b'B' => Some(KeyCode::Down),
            b'C' => Some(KeyCode::Right),
            b'D' => Some(KeyCode::Left),
            b'H' => Some(KeyCode::Home),
            b'F' => Some(KeyCode::End),
            b'Z' => {
                events.push(InputEvent::Key(KeyEvent::new(KeyCode::Tab, Modifiers::SHIFT)));
                return Step::Consumed;
            }
            // Only the 3/4/8/9 family can reach here: the window-ops
            // discriminators claim every other digit prefix.
            b'~' => match params.first().copied().unwrap_or(0) {
                3 => Some(KeyCode::Delete),
                4 => Some(KeyCode::End),
                5 => Some(KeyCode::PageUp),
                6 => Some(KeyCode::PageDown),
                _ => None,
            },
            _ => None,
        };

        if let Some(code) = code {
            events.push(InputEvent::Key(KeyEvent::new(code, modifiers)));
        }
        Step::Consumed
    }

    fn parse_utf8(&mut self, events: &mut Vec<InputEvent>) -> Step {
        let first = self.buf[0];
        let expected = if first & 0xE0 == 0xC0 {
            2
        } else if first & 0xF0 == 0xE0 {
            3
        } else if first & 0xF8 == 0xF0 {
            4
        } else {
            self.consume(1);
            return Step::Consumed; // stray continuation byte
        };

        if self.buf.len() < expected {
            return Step::Incomplete;
        }

        let s = String::from_utf8_lossy(&self.buf[..expected]).into_owned();
        self.consume(expected);
        if let Some(ch) = s.chars().next() {
            events.push(InputEvent::Key(KeyEvent::ch(ch)));
        }
        Step::Consumed
    }
}

// =============================================================================
// Decoding helpers
// =============================================================================

fn plain_key(byte: u8) -> Option<KeyEvent> {
    Some(match byte {
        0x00 => KeyEvent::new(KeyCode::Null, Modifiers::CTRL),
        0x08 => KeyEvent::plain(KeyCode::Backspace),
        0x09 => KeyEvent::plain(KeyCode::Tab),
        0x0A | 0x0D => KeyEvent::plain(KeyCode::Enter),
        0x01..=0x1A => {
            // Remaining C0 bytes are Ctrl+letter.
            KeyEvent::new(KeyCode::Char((byte - 1 + b'a') as char), Modifiers::CTRL)
        }
        0x7F => KeyEvent::plain(KeyCode::Backspace),
        0x20..=0x7E => KeyEvent::ch(byte as char),
        _ => return None,
    })
}

/// Map a legacy mouse coordinate byte to a cell coordinate.
///
/// Normally `byte - 33` (the protocol offsets by 32 and reports 1-based).
/// Two quirks of the 7-bit reuse are preserved exactly: the DEL value 0x7F
/// maps to 94, and bytes with the high bit set carry their low 7 bits
/// offset by +31.
fn remap_coordinate(byte: u8) -> i32 {
    if byte == 0x7F {
        94
    } else if byte >= 0x80 {
        (byte & 0x7F) as i32 + 31
    } else {
        byte as i32 - 33
    }
}

/// Split a raw mouse type field into kind and modifiers.
///
/// Flags are peeled off in descending order: wheel (64), motion (32),
/// ctrl (16), alt (8), shift (4); the remainder is the button number.
fn decompose_mouse(mut raw: i32, press: bool) -> (MouseKind, Modifiers) {
    let mut modifiers = Modifiers::NONE;

    let wheel = raw >= 64;
    if wheel {
        raw -= 64;
    }
    let moved = raw >= 32;
    if moved {
        raw -= 32;
    }
    if raw >= 16 {
        modifiers |= Modifiers::CTRL;
        raw -= 16;
    }
    if raw >= 8 {
        modifiers |= Modifiers::ALT;
        raw -= 8;
    }
    if raw >= 4 {
        modifiers |= Modifiers::SHIFT;
        raw -= 4;
    }

    let kind = if wheel {
        match raw {
            0 => MouseKind::WheelUp,
            1 => MouseKind::WheelDown,
            _ => MouseKind::Unknown,
        }
    } else {
        match (raw, moved, press) {
            (0, false, true) => MouseKind::LeftPress,
            (1, false, true) => MouseKind::MiddlePress,
            (2, false, true) => MouseKind::RightPress,
            (0, false, false) => MouseKind::LeftRelease,
            (1, false, false) => MouseKind::MiddleRelease,
            (2, false, false) => MouseKind::RightRelease,
            (3, false, _) => MouseKind::Release,
            (0, true, true) => MouseKind::LeftDrag,
            (1, true, true) => MouseKind::MiddleDrag,
            (2, true, true) => MouseKind::RightDrag,
            (3, true, _) => MouseKind::Move,
            _ => MouseKind::Unknown,
        }
    };

    (kind, modifiers)
}

/// CSI key modifier parameter (1-based).
fn csi_modifiers(param: i32) -> Modifiers {
    let value = (param - 1).max(0);
    let mut m = Modifiers::NONE;
    if value & 1 != 0 {
        m |= Modifiers::SHIFT;
    }
    if value & 2 != 0 {
        m |= Modifiers::ALT;
    }
    if value & 4 != 0 {
        m |= Modifiers::CTRL;
    }
    if value & 8 != 0 {
        m |= Modifiers::SUPER;
    }
    m
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(data: &[u8]) -> Vec<InputEvent> {
        Decoder::new().feed(data)
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(code))
    }

    #[test]
    fn plain_printables() {
        let events = decode(b"hi!");
        assert_eq!(
            events,
            vec![
                key(KeyCode::Char('h')),
                key(KeyCode::Char('i')),
                key(KeyCode::Char('!')),
            ]
        );
    }

    #[test]
    fn control_bytes() {
        assert_eq!(decode(b"\r")[0], key(KeyCode::Enter));
        assert_eq!(decode(b"\t")[0], key(KeyCode::Tab));
        assert_eq!(
            decode(b"\x03")[0],
            InputEvent::Key(KeyEvent::new(KeyCode::Char('c'), Modifiers::CTRL))
        );
        assert_eq!(decode(&[0x7F])[0], key(KeyCode::Backspace));
    }

    #[test]
    fn utf8_key() {
        assert_eq!(decode("é".as_bytes())[0], key(KeyCode::Char('é')));
    }

    #[test]
    fn bare_escape_recovery_replays_the_next_byte() {
        let events = decode(b"\x1bx");
        assert_eq!(events, vec![key(KeyCode::Escape), key(KeyCode::Char('x'))]);
    }

    #[test]
    fn focus_events() {
        assert_eq!(decode(b"\x1b[I"), vec![InputEvent::FocusIn]);
        assert_eq!(decode(b"\x1b[O"), vec![InputEvent::FocusOut]);
    }

    #[test]
    fn legacy_mouse_left_press() {
        // type = 32+0, x = 33+5, y = 33+10 -> left press at column 5, row 10
        let events = decode(&[0x1B, b'[', b'M', 32, 33 + 5, 33 + 10]);
        assert_eq!(
            events,
            vec![InputEvent::Mouse(MouseEvent {
                kind: MouseKind::LeftPress,
                x: 5,
                y: 10,
                modifiers: Modifiers::NONE,
            })]
        );
    }

    #[test]
    fn legacy_mouse_modifier_bits() {
        // 32 + button 1 + ctrl 16 + shift 4 = 53
        let events = decode(&[0x1B, b'[', b'M', 32 + 21, 40, 40]);
        let InputEvent::Mouse(m) = &events[0] else {
            panic!("expected mouse event");
        };
        assert_eq!(m.kind, MouseKind::MiddlePress);
        assert_eq!(m.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
    }

    #[test]
    fn legacy_mouse_wheel_and_motion() {
        let wheel = decode(&[0x1B, b'[', b'M', 32 + 64, 40, 40]);
        assert!(matches!(
            wheel[0],
            InputEvent::Mouse(MouseEvent {
                kind: MouseKind::WheelUp,
                ..
            })
        ));

        let drag = decode(&[0x1B, b'[', b'M', 32 + 32, 40, 40]);
        assert!(matches!(
            drag[0],
            InputEvent::Mouse(MouseEvent {
                kind: MouseKind::LeftDrag,
                ..
            })
        ));
    }

    #[test]
    fn legacy_coordinate_remap_quirks() {
        assert_eq!(remap_coordinate(0x7F), 94);
        assert_eq!(remap_coordinate(38), 5);
        // High-bit bytes carry their low 7 bits offset by +31.
        assert_eq!(remap_coordinate(0x80 | 33), 64);
    }

    #[test]
    fn sgr_mouse_press_and_release() {
        let press = decode(b"\x1b[<0;10;20M");
        assert_eq!(
            press,
            vec![InputEvent::Mouse(MouseEvent {
                kind: MouseKind::LeftPress,
                x: 9,
                y: 19,
                modifiers: Modifiers::NONE,
            })]
        );

        let release = decode(b"\x1b[<0;10;20m");
        assert!(matches!(
            release[0],
            InputEvent::Mouse(MouseEvent {
                kind: MouseKind::LeftRelease,
                ..
            })
        ));
    }

    #[test]
    fn sgr_mouse_malformed_field_is_dropped() {
        let events = decode(b"\x1b[<zero;10;20M");
        assert!(events.is_empty());
        // The stream recovers: the next sequence decodes fine.
        assert_eq!(decode(b"\x1b[<zero;1;1Mx").last().unwrap(), &key(KeyCode::Char('x')));
    }

    #[test]
    fn paste_sequence() {
        let events = decode(b"\x1b[200~hello world\x1b[201~");
        assert_eq!(events, vec![InputEvent::Paste("hello world".into())]);
    }

    #[test]
    fn paste_containing_escape_bytes() {
        let events = decode(b"\x1b[200~a\x1b[Bb\x1b[201~");
        assert_eq!(events, vec![InputEvent::Paste("a\x1b[Bb".into())]);
    }

    #[test]
    fn win_state_open_and_closed() {
        assert_eq!(
            decode(b"\x1b[1"),
            vec![InputEvent::WinOps(WinOpsResponse::WinState(true))]
        );
        assert_eq!(
            decode(b"\x1b[2t"),
            vec![InputEvent::WinOps(WinOpsResponse::WinState(false))]
        );
    }

    #[test]
    fn win_position_response() {
        assert_eq!(
            decode(b"\x1b[3;40;25t"),
            vec![InputEvent::WinOps(WinOpsResponse::WinPos { x: 40, y: 25 })]
        );
    }

    #[test]
    fn win_size_responses_carry_height_first() {
        assert_eq!(
            decode(b"\x1b[8;24;80t"),
            vec![InputEvent::WinOps(WinOpsResponse::WinSize(Size::new(80, 24)))]
        );
        assert_eq!(
            decode(b"\x1b[4;600;800t"),
            vec![InputEvent::WinOps(WinOpsResponse::WinSizePx(Size::new(
                800, 600
            )))]
        );
        assert_eq!(
            decode(b"\x1b[9;1080;1920t"),
            vec![InputEvent::WinOps(WinOpsResponse::ScrSize(Size::new(
                1920, 1080
            )))]
        );
    }

    #[test]
    fn malformed_win_response_is_dropped() {
        assert!(decode(b"\x1b[8;2f4;80t").is_empty());
    }

    #[test]
    fn dec_private_mode_response() {
        assert_eq!(
            decode(b"\x1b[?2026;2$y"),
            vec![InputEvent::DecReq(DecReqResponse {
                mode: 2026,
                kind: 2
            })]
        );
    }

    #[test]
    fn osc_window_title_and_icon_label() {
        assert_eq!(
            decode(b"\x1b]lterm title\x0f"),
            vec![InputEvent::WinOps(WinOpsResponse::WinTitle(
                "term title".into()
            ))]
        );
        assert_eq!(
            decode(b"\x1b]Licon\x0f"),
            vec![InputEvent::WinOps(WinOpsResponse::IconLabel("icon".into()))]
        );
    }

    #[test]
    fn arrow_and_navigation_keys() {
        assert_eq!(decode(b"\x1b[A")[0], key(KeyCode::Up));
        assert_eq!(decode(b"\x1b[D")[0], key(KeyCode::Left));
        assert_eq!(decode(b"\x1b[3~")[0], key(KeyCode::Delete));
        assert_eq!(decode(b"\x1b[5~")[0], key(KeyCode::PageUp));
        assert_eq!(
            decode(b"\x1b[Z")[0],
            InputEvent::Key(KeyEvent::new(KeyCode::Tab, Modifiers::SHIFT))
        );
    }

    #[test]
    fn digit_discriminators_outrank_key_sequences() {
        // The window-ops mapping claims the `1` prefix, so `ESC [ 1 ...`
        // reports WinState(open) and the remaining bytes decode on their own.
        let events = decode(b"\x1b[1~");
        assert_eq!(events[0], InputEvent::WinOps(WinOpsResponse::WinState(true)));
        assert_eq!(events[1], key(KeyCode::Char('~')));
    }

    #[test]
    fn split_feeds_resume_midsequence() {
        let mut decoder = Decoder::new();
        assert!(decoder.feed(b"\x1b[<0;1").is_empty());
        assert!(decoder.has_pending());
        let events = decoder.feed(b"0;20M");
        assert_eq!(events.len(), 1);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn interleaved_sequences_decode_in_order() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"a");
        bytes.extend_from_slice(b"\x1b[I");
        bytes.extend_from_slice(b"\x1b[<0;2;3M");
        bytes.extend_from_slice(b"b");
        let events = decode(&bytes);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], key(KeyCode::Char('a')));
        assert_eq!(events[1], InputEvent::FocusIn);
        assert!(matches!(events[2], InputEvent::Mouse(_)));
        assert_eq!(events[3], key(KeyCode::Char('b')));
    }

    #[test]
    fn flush_pending_drains_a_stalled_escape() {
        let mut decoder = Decoder::new();
        assert!(decoder.feed(b"\x1b").is_empty());
        let events = decoder.flush_pending();
        assert_eq!(events, vec![key(KeyCode::Escape)]);
        assert!(!decoder.has_pending());
    }
}
