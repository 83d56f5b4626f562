//! Error types for minftp
//!
//! Provides a unified error type for transport, transfer and protocol
//! operations.

use std::io;
use thiserror::Error;

/// Result type alias using FtpError
pub type Result<T> = std::result::Result<T, FtpError>;

/// Unified error type for minftp operations
#[derive(Debug, Error)]
pub enum FtpError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The peer shut the connection down before the expected bytes arrived
    #[error("Connection closed by peer")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Transfer Errors
    // -------------------------------------------------------------------------
    /// The blob destination rejected a write; `remaining` bytes of the blob
    /// are still unread on the wire.
    #[error("Write to blob destination failed ({remaining} bytes left on the wire): {source}")]
    Sink {
        remaining: u64,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FtpError {
    /// True when the error means the session's connection is gone,
    /// whether by orderly shutdown or by a reset/abort from the peer.
    pub fn is_disconnect(&self) -> bool {
        match self {
            FtpError::ConnectionClosed => true,
            FtpError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::UnexpectedEof
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }

    /// True when a read or write gave up because a socket timeout expired
    pub fn is_timeout(&self) -> bool {
        match self {
            FtpError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}
