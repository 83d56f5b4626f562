//! Connection Handler
//!
//! Sets up a TCP connection and runs one session over it.

use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::executor::Executor;
use crate::transport::{TcpTransport, Transport};
use super::Session;

/// Handles a single client connection
pub struct Connection {
    session: Session<TcpStream, TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Configures the socket and starts the session in the executor's
    /// start directory.
    pub fn new(stream: TcpStream, config: &Config, executor: Executor) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        let transport: TcpTransport =
            Transport::from_tcp(stream)?.with_limits(config.max_line_len, config.chunk_size);

        Ok(Self {
            session: Session::new(transport, executor),
            peer_addr,
        })
    }

    /// Handle the connection (blocking until closed)
    pub fn handle(&mut self) -> Result<()> {
        tracing::info!(
            "Session started for {} in {}",
            self.peer_addr,
            self.session.executor().workdir().start().display()
        );

        let result = self.session.run();
        match &result {
            Ok(()) => tracing::info!("Client {} disconnected", self.peer_addr),
            Err(e) => tracing::warn!("Session with {} ended with error: {}", self.peer_addr, e),
        }
        result
    }
}
