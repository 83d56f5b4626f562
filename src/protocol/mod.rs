//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! Framing is purely positional: there is no version header and no frame
//! tag. Each side knows from the command what the next frame must be.
//!
//! ### Request
//! ```text
//! <verb>[ <argument>]\n
//! ```
//!
//! ### Reply
//! ```text
//! OK\n                       then, depending on the verb, one blob
//! ERR <message>\n            never followed by a blob
//! ```
//!
//! ### Verbs
//! - pwd, ls:          OK + text blob
//! - cd, mkdir, delete: OK + confirmation text blob
//! - get:              OK + file blob
//! - put:              OK, client sends file blob, then a second status line
//! - quit:             OK, session ends

mod command;
mod status;
mod frame;
mod codec;

pub use command::{Command, Verb};
pub use status::{Status, UNKNOWN_COMMAND};
pub use frame::{Frame, FrameKind};
pub use codec::{
    read_frame, write_frame,
    read_command, write_command,
    read_status, write_status,
};
