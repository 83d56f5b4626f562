//! Executor Module
//!
//! Executes parsed commands against the filesystem.
//!
//! ## Responsibilities
//! - Resolve every path against the session's [`WorkDir`]
//! - Produce the outcome of a command: text, a file to stream, an upload
//!   target, or a failure message
//! - Never touch the wire; the session decides how outcomes are framed

mod workdir;

pub use workdir::WorkDir;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::protocol::{Command, Verb};

// =============================================================================
// Reply Messages
// =============================================================================

pub const PWD_FAILED: &str = "Failed to get current directory.";
pub const LS_FAILED: &str = "Could not open current directory.";
pub const CD_FAILED: &str = "Failed to change directory.";
pub const MKDIR_FAILED: &str = "Failed to create directory.";
pub const DELETE_FAILED: &str = "Failed to delete file.";
pub const GET_FAILED: &str = "File not found.";
pub const UPLOAD_SIZE_FAILED: &str = "Failed to read upload size.";
pub const UPLOAD_CREATE_FAILED: &str = "Failed to create local file on server.";
pub const UPLOAD_CONNECTION_FAILED: &str = "Connection closed during upload.";
pub const UPLOAD_WRITE_FAILED: &str = "Disk write error on server.";

const CD_DONE: &str = "Directory changed successfully.\n";
const MKDIR_DONE: &str = "Directory created successfully.\n";

/// What a command produced
#[derive(Debug)]
pub enum Outcome {
    /// OK followed by a text blob
    Text(Vec<u8>),

    /// OK followed by the file's bytes as a blob
    Download { file: File, len: u64 },

    /// OK, then receive an upload into `target`
    Upload { target: PathBuf },

    /// OK, then end the session
    Quit,

    /// ERR with this message, no payload
    Failed(&'static str),
}

/// Executes commands for one session
pub struct Executor {
    workdir: WorkDir,
}

impl Executor {
    /// Create an executor whose sessions start in `root`
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            workdir: WorkDir::new(root)?,
        })
    }

    pub fn workdir(&self) -> &WorkDir {
        &self.workdir
    }

    /// Forget any `cd` from a previous session
    pub fn reset(&mut self) {
        self.workdir.reset();
    }

    /// Execute a command
    pub fn execute(&mut self, command: &Command) -> Outcome {
        let arg = command.arg();
        let outcome = match command.verb {
            Verb::Pwd => self.pwd(),
            Verb::Ls => self.ls(),
            Verb::Cd => self.cd(arg),
            Verb::Mkdir => self.mkdir(arg),
            Verb::Delete => self.delete(arg),
            Verb::Get => self.get(arg),
            Verb::Put => Outcome::Upload {
                target: self.workdir.resolve(arg),
            },
            Verb::Quit => Outcome::Quit,
        };

        if let Outcome::Failed(message) = &outcome {
            tracing::warn!("{} {:?} failed: {}", command.verb, arg, message);
        }
        outcome
    }

    /// Create (or truncate) the destination of an upload
    pub fn create_upload(&self, target: &Path) -> io::Result<File> {
        File::create(target)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn pwd(&self) -> Outcome {
        match fs::metadata(self.workdir.cwd()) {
            Ok(meta) if meta.is_dir() => {
                Outcome::Text(format!("{}\n", self.workdir.cwd().display()).into_bytes())
            }
            _ => Outcome::Failed(PWD_FAILED),
        }
    }

    fn ls(&self) -> Outcome {
        let entries = match fs::read_dir(self.workdir.cwd()) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("read_dir {}: {}", self.workdir.cwd().display(), e);
                return Outcome::Failed(LS_FAILED);
            }
        };

        // read_dir never yields "." or "..".
        let mut listing = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    listing.extend_from_slice(entry.file_name().to_string_lossy().as_bytes());
                    listing.push(b'\n');
                }
                Err(e) => tracing::warn!("Skipping unreadable directory entry: {}", e),
            }
        }
        Outcome::Text(listing)
    }

    fn cd(&mut self, arg: &str) -> Outcome {
        match self.workdir.change_dir(arg) {
            Ok(()) => {
                tracing::debug!("cwd is now {}", self.workdir.cwd().display());
                Outcome::Text(CD_DONE.as_bytes().to_vec())
            }
            Err(e) => {
                tracing::debug!("cd {:?}: {}", arg, e);
                Outcome::Failed(CD_FAILED)
            }
        }
    }

    fn mkdir(&self, arg: &str) -> Outcome {
        if arg.is_empty() {
            return Outcome::Failed(MKDIR_FAILED);
        }
        match fs::create_dir(self.workdir.resolve(arg)) {
            Ok(()) => Outcome::Text(MKDIR_DONE.as_bytes().to_vec()),
            Err(e) => {
                tracing::debug!("mkdir {:?}: {}", arg, e);
                Outcome::Failed(MKDIR_FAILED)
            }
        }
    }

    fn delete(&self, arg: &str) -> Outcome {
        if arg.is_empty() {
            return Outcome::Failed(DELETE_FAILED);
        }

        let path = self.workdir.resolve(arg);
        let removed = fs::symlink_metadata(&path).and_then(|meta| {
            if meta.is_dir() {
                fs::remove_dir(&path)
            } else {
                fs::remove_file(&path)
            }
        });

        match removed {
            Ok(()) => Outcome::Text(format!("File '{}' deleted successfully.\n", arg).into_bytes()),
            Err(e) => {
                tracing::debug!("delete {:?}: {}", arg, e);
                Outcome::Failed(DELETE_FAILED)
            }
        }
    }

    fn get(&self, arg: &str) -> Outcome {
        if arg.is_empty() {
            return Outcome::Failed(GET_FAILED);
        }

        let opened = File::open(self.workdir.resolve(arg))
            .and_then(|file| file.metadata().map(|meta| (file, meta)));

        match opened {
            Ok((file, meta)) if meta.is_file() => Outcome::Download {
                file,
                len: meta.len(),
            },
            Ok(_) => Outcome::Failed(GET_FAILED),
            Err(e) => {
                tracing::debug!("get {:?}: {}", arg, e);
                Outcome::Failed(GET_FAILED)
            }
        }
    }
}
