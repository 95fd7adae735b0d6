//! Raw terminal input: typed event payloads, the escape-sequence decoder
//! state machine, and the background reader thread feeding the event queue.

mod decoder;
mod driver;
mod event;

pub use decoder::Decoder;
pub use driver::InputDriver;
pub use event::{
    DecReqResponse, InputEvent, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseKind,
    WinOpsResponse,
};
