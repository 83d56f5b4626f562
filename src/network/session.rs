//! Server session
//!
//! The per-connection command loop, independent of the socket type.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{FtpError, Result};
use crate::executor::{
    Executor, Outcome, UPLOAD_CONNECTION_FAILED, UPLOAD_CREATE_FAILED, UPLOAD_SIZE_FAILED,
    UPLOAD_WRITE_FAILED,
};
use crate::protocol::{read_command, write_status, Command, Status, UNKNOWN_COMMAND};
use crate::transfer::{recv_blob_or_drain, send_blob, send_blob_from};
use crate::transport::Transport;
use super::Flow;

/// One client session on the server side
pub struct Session<R: Read, W: Write> {
    transport: Transport<R, W>,
    executor: Executor,
}

impl<R: Read, W: Write> Session<R, W> {
    /// Create a session; the executor is reset to its start directory
    pub fn new(transport: Transport<R, W>, mut executor: Executor) -> Self {
        executor.reset();
        Self { transport, executor }
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Consume the session, returning its transport
    pub fn into_transport(self) -> Transport<R, W> {
        self.transport
    }

    /// Serve commands until `quit` or the connection ends
    ///
    /// Orderly closure, resets and timeouts end the session with `Ok`.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => {
                    tracing::debug!("Client quit");
                    return Ok(());
                }
                Err(e) if e.is_disconnect() => {
                    tracing::debug!("Client disconnected: {}", e);
                    return Ok(());
                }
                Err(e) if e.is_timeout() => {
                    tracing::debug!("Read timeout: {}", e);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Read and fully process one command line
    pub fn step(&mut self) -> Result<Flow> {
        let command = match read_command(&mut self.transport) {
            Ok(command) => command,
            Err(FtpError::UnknownCommand(line)) => {
                tracing::warn!("Unknown command: {:?}", line);
                write_status(&mut self.transport, &Status::err(UNKNOWN_COMMAND))?;
                return Ok(Flow::Continue);
            }
            Err(e) => return Err(e),
        };

        tracing::debug!("Received command: {}", command);
        self.dispatch(&command)
    }

    fn dispatch(&mut self, command: &Command) -> Result<Flow> {
        match self.executor.execute(command) {
            Outcome::Text(text) => {
                write_status(&mut self.transport, &Status::Ok)?;
                send_blob(&mut self.transport, &text)?;
            }
            Outcome::Download { mut file, len } => {
                write_status(&mut self.transport, &Status::Ok)?;
                send_blob_from(&mut self.transport, &mut file, len)?;
                tracing::debug!("Sent {} bytes for {:?}", len, command.arg());
            }
            Outcome::Upload { target } => self.receive_upload(&target)?,
            Outcome::Quit => {
                write_status(&mut self.transport, &Status::Ok)?;
                return Ok(Flow::Quit);
            }
            Outcome::Failed(message) => {
                write_status(&mut self.transport, &Status::err(message))?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Receive mode for `put`
    ///
    /// The declared length is always consumed from the stream, even when
    /// the target cannot be written, so the next command line is read from
    /// the right place.
    fn receive_upload(&mut self, target: &Path) -> Result<()> {
        write_status(&mut self.transport, &Status::Ok)?;

        let len = match self.transport.recv_u64() {
            Ok(len) => len,
            Err(e) => {
                let _ = write_status(&mut self.transport, &Status::err(UPLOAD_SIZE_FAILED));
                return Err(e);
            }
        };

        let mut file = match self.executor.create_upload(target) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Cannot create {}: {}", target.display(), e);
                self.transport.discard(len)?;
                return write_status(&mut self.transport, &Status::err(UPLOAD_CREATE_FAILED));
            }
        };

        match recv_blob_or_drain(&mut self.transport, &mut file, len) {
            Ok(received) => {
                tracing::debug!("Stored {} bytes in {}", received, target.display());
                write_status(&mut self.transport, &Status::Ok)
            }
            Err(FtpError::Sink { source, .. }) => {
                tracing::warn!("Write to {} failed: {}", target.display(), source);
                write_status(&mut self.transport, &Status::err(UPLOAD_WRITE_FAILED))
            }
            Err(e) if e.is_disconnect() => {
                let _ = write_status(&mut self.transport, &Status::err(UPLOAD_CONNECTION_FAILED));
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
