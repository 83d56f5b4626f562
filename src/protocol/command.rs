//! Command definitions
//!
//! Represents requests from clients.

use std::fmt;

use crate::error::{FtpError, Result};

/// Command verbs understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Pwd,
    Ls,
    Cd,
    Mkdir,
    Delete,
    Get,
    Put,
    Quit,
}

impl Verb {
    /// Every verb, in protocol order
    pub const ALL: [Verb; 8] = [
        Verb::Pwd,
        Verb::Ls,
        Verb::Cd,
        Verb::Mkdir,
        Verb::Delete,
        Verb::Get,
        Verb::Put,
        Verb::Quit,
    ];

    /// Keyword as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Pwd => "pwd",
            Verb::Ls => "ls",
            Verb::Cd => "cd",
            Verb::Mkdir => "mkdir",
            Verb::Delete => "delete",
            Verb::Get => "get",
            Verb::Put => "put",
            Verb::Quit => "quit",
        }
    }

    /// Exact (case-sensitive) keyword match, as the server does it
    pub fn from_keyword(keyword: &str) -> Option<Verb> {
        Self::ALL.into_iter().find(|v| v.as_str() == keyword)
    }

    /// Classify a raw input line by its first token, ignoring case
    ///
    /// The client uses this to decide how to consume the reply to a line
    /// it is about to send verbatim.
    pub fn classify(line: &str) -> Option<Verb> {
        let keyword = line.split_whitespace().next()?;
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,

    /// Everything after the first space, verbatim
    pub argument: Option<String>,
}

impl Command {
    /// Create a command without an argument
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            argument: None,
        }
    }

    /// Create a command with an argument
    pub fn with_argument(verb: Verb, argument: impl Into<String>) -> Self {
        Self {
            verb,
            argument: Some(argument.into()),
        }
    }

    /// Parse a command line (terminator already removed)
    ///
    /// The verb is the first whitespace-delimited token. The argument is
    /// everything after the first space, unquoted and unescaped. One
    /// trailing `\r` is ignored.
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        let keyword = line.split_whitespace().next().unwrap_or("");
        let verb = Verb::from_keyword(keyword)
            .ok_or_else(|| FtpError::UnknownCommand(line.to_string()))?;

        let argument = line.split_once(' ').map(|(_, rest)| rest.to_string());

        Ok(Command { verb, argument })
    }

    /// The argument, or the empty string when none was given
    pub fn arg(&self) -> &str {
        self.argument.as_deref().unwrap_or("")
    }

    /// Render as a wire line, without terminator
    pub fn to_line(&self) -> String {
        match &self.argument {
            Some(arg) => format!("{} {}", self.verb, arg),
            None => self.verb.to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
