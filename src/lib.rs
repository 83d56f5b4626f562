//! # minftp
//!
//! A minimal remote filesystem protocol over a single TCP stream:
//! - Line-based commands and `OK` / `ERR <message>` status lines
//! - Length-prefixed blobs for listings, command output and file contents
//! - Chunked streaming in both directions, with draining on rejection
//! - Per-session working directory, one client at a time
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Session Loop (network)                       │
//! │        Server accept loop / Session / Client                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │               Command Protocol (protocol)                    │
//! │          Command, Status, Frame, codec      ──► Executor     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │               Transfer Encoding (transfer)                   │
//! │          u64 length prefix + raw bytes, chunked              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │               Session Transport (transport)                  │
//! │      exact send/recv, lines, u64, discard; EINTR retry       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod transport;
pub mod transfer;
pub mod protocol;
pub mod executor;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FtpError, Result};
pub use config::{ClientConfig, Config};
pub use executor::Executor;
pub use network::{Client, Server};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of minftp
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
