//! TCP Server
//!
//! Accepts connections and serves them one at a time.

use std::fs;
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Config;
use crate::error::{FtpError, Result};
use crate::executor::Executor;
use super::Connection;

/// TCP server for minftp
pub struct Server {
    config: Config,

    /// Canonical directory every session starts in
    root: PathBuf,

    listener: TcpListener,

    shutdown: AtomicBool,
}

impl Server {
    /// Bind the listen address and resolve the root directory
    pub fn bind(config: Config) -> Result<Self> {
        let root = fs::canonicalize(&config.root_dir).map_err(|e| {
            FtpError::Config(format!(
                "Root directory {}: {}",
                config.root_dir.display(),
                e
            ))
        })?;

        let listener = TcpListener::bind(&config.listen_addr)?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            config,
            root,
            listener,
            shutdown: AtomicBool::new(false),
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start the server (blocking)
    ///
    /// Sessions are served strictly one after another. The shutdown flag
    /// is checked between sessions.
    pub fn run(&self) -> Result<()> {
        while !self.shutdown.load(Ordering::Relaxed) {
            self.serve_next();
        }
        tracing::info!("Server shut down");
        Ok(())
    }

    /// Accept one connection and serve it to completion
    ///
    /// Failures are logged; none of them stop the server.
    pub fn serve_next(&self) {
        let (stream, addr) = match self.listener.accept() {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!("Accept failed: {}", e);
                return;
            }
        };

        if self.shutdown.load(Ordering::Relaxed) {
            tracing::debug!("Dropping {} during shutdown", addr);
            return;
        }

        // A fresh executor per session, so no earlier `cd` survives.
        let executor = match Executor::new(&self.root) {
            Ok(executor) => executor,
            Err(e) => {
                tracing::error!("Cannot start session for {}: {}", addr, e);
                return;
            }
        };

        match Connection::new(stream, &self.config, executor) {
            Ok(mut connection) => {
                connection.handle().ok();
            }
            Err(e) => tracing::warn!("Failed to set up connection from {}: {}", addr, e),
        }

        tracing::info!("Waiting for next client");
    }

    /// Signal the server to stop after the current session
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
