//! Session Transport Module
//!
//! Byte-exact primitives every higher frame is built from.
//!
//! ## Responsibilities
//! - Send/receive an exact byte count over a stream
//! - Send/receive newline-terminated lines
//! - Send/receive the fixed-width length prefix
//! - Drain unwanted payload bytes to keep framing aligned
//!
//! Interrupted system calls are retried here and nowhere else. A zero-byte
//! read is reported as [`FtpError::ConnectionClosed`](crate::FtpError),
//! distinct from hard I/O errors.
//!
//! ## Length Prefix
//! ```text
//! ┌───────────────────────────────────────┐
//! │  u64, 8 bytes, little-endian          │
//! └───────────────────────────────────────┘
//! ```

mod stream;

pub use stream::{Transport, TcpTransport, LENGTH_PREFIX_SIZE};
pub(crate) use stream::chunk_for;
