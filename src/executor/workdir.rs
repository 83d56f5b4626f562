//! Per-session working directory
//!
//! Paths from the client are resolved against the session's own current
//! directory instead of the process-wide one, so `cd` in one session can
//! never leak into another.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Working directory state of one session
#[derive(Debug, Clone)]
pub struct WorkDir {
    /// Where the session started (canonical)
    start: PathBuf,

    /// Current directory (canonical)
    cwd: PathBuf,
}

impl WorkDir {
    /// Create a working directory rooted at `start`
    ///
    /// Fails if `start` does not exist or is not a directory.
    pub fn new(start: impl AsRef<Path>) -> io::Result<Self> {
        let start = fs::canonicalize(start)?;
        if !start.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", start.display()),
            ));
        }
        Ok(Self {
            cwd: start.clone(),
            start,
        })
    }

    /// Current directory
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Directory the session started in
    pub fn start(&self) -> &Path {
        &self.start
    }

    /// Resolve a client-supplied path against the current directory
    ///
    /// Absolute paths are taken as-is.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.cwd.join(path)
    }

    /// Change the current directory
    ///
    /// On failure the current directory is left unchanged.
    pub fn change_dir(&mut self, path: &str) -> io::Result<()> {
        if path.is_empty() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "empty path"));
        }

        let target = fs::canonicalize(self.resolve(path))?;
        if !target.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", target.display()),
            ));
        }
        // Looking up `.` through the target needs search permission on it.
        fs::metadata(target.join("."))?;

        self.cwd = target;
        Ok(())
    }

    /// Go back to the start directory
    pub fn reset(&mut self) {
        self.cwd.clone_from(&self.start);
    }
}
