//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor loop, one session at a time
//! - Each session owns its transport and executor
//! - Commands are processed to completion before the next line is read

mod session;
mod connection;
mod server;
mod client;

pub use session::Session;
pub use connection::Connection;
pub use server::Server;
pub use client::{remote_basename, Client};

/// Whether a session continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
