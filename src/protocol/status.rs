//! Status line definitions
//!
//! Every command line gets exactly one status line before any payload.

use std::fmt;

use crate::error::{FtpError, Result};

/// Message sent for verbs the server does not recognize
pub const UNKNOWN_COMMAND: &str = "Unknown command.";

/// Reply status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    Err(String),
}

impl Status {
    /// Create an ERR status
    pub fn err(message: impl Into<String>) -> Self {
        Status::Err(message.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Render as a wire line, without terminator
    pub fn to_line(&self) -> String {
        match self {
            Status::Ok => "OK".to_string(),
            Status::Err(message) => format!("ERR {}", message),
        }
    }

    /// Parse a status line (terminator already removed)
    pub fn parse(line: &str) -> Result<Status> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line == "OK" {
            return Ok(Status::Ok);
        }
        if line == "ERR" {
            return Ok(Status::Err(String::new()));
        }
        match line.strip_prefix("ERR ") {
            Some(message) => Ok(Status::Err(message.to_string())),
            None => Err(FtpError::Protocol(format!("Malformed status line: {:?}", line))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
