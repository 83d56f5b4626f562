//! Configuration for minftp
//!
//! Centralized configuration with sensible defaults for both peers.

use std::path::PathBuf;

use crate::error::{FtpError, Result};

/// Default maximum length of a command or status line, terminator included
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;

/// Default I/O chunk used by the server when streaming blobs
pub const DEFAULT_SERVER_CHUNK: usize = 8192;

/// Default I/O chunk used by the client when streaming blobs
pub const DEFAULT_CLIENT_CHUNK: usize = 64 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Connection read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Session Configuration
    // -------------------------------------------------------------------------
    /// Directory every new session starts in
    pub root_dir: PathBuf,

    /// Longest accepted command line; longer lines are truncated
    pub max_line_len: usize,

    /// Chunk size for blob streaming (bytes)
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:2121".to_string(),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            root_dir: PathBuf::from("."),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            chunk_size: DEFAULT_SERVER_CHUNK,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the directory sessions start in
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the maximum line length (in bytes, terminator included)
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    /// Set the blob streaming chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Result<Config> {
        validate_framing(self.config.max_line_len, self.config.chunk_size)?;
        Ok(self.config)
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address (host:port)
    pub server_addr: String,

    /// Where downloads are written and relative upload paths are read from
    pub local_dir: PathBuf,

    /// Longest accepted status line
    pub max_line_len: usize,

    /// Chunk size for blob streaming (bytes)
    pub chunk_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:2121".to_string(),
            local_dir: PathBuf::from("."),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            chunk_size: DEFAULT_CLIENT_CHUNK,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    pub fn local_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.local_dir = path.into();
        self
    }

    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        validate_framing(self.config.max_line_len, self.config.chunk_size)?;
        Ok(self.config)
    }
}

fn validate_framing(max_line_len: usize, chunk_size: usize) -> Result<()> {
    // One byte is reserved for the terminator, so a line needs room for at least one more.
    if max_line_len < 2 {
        return Err(FtpError::Config(format!(
            "max_line_len must be at least 2, got {}",
            max_line_len
        )));
    }
    if chunk_size == 0 {
        return Err(FtpError::Config("chunk_size must be non-zero".to_string()));
    }
    Ok(())
}
