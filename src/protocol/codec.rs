//! Protocol codec
//!
//! Reads and writes frames, commands and status lines over a transport.

use std::io::{Read, Write};

use crate::error::Result;
use crate::transfer::{recv_blob_to_vec, send_blob};
use crate::transport::Transport;
use super::{Command, Frame, FrameKind, Status};

// =============================================================================
// Frames
// =============================================================================

/// Read the next frame, which must be of `kind`
pub fn read_frame<R: Read, W: Write>(
    transport: &mut Transport<R, W>,
    kind: FrameKind,
) -> Result<Frame> {
    match kind {
        FrameKind::Line => transport.recv_line().map(Frame::Line),
        FrameKind::Blob => recv_blob_to_vec(transport).map(Frame::Blob),
    }
}

/// Write one frame
pub fn write_frame<R: Read, W: Write>(transport: &mut Transport<R, W>, frame: &Frame) -> Result<()> {
    match frame {
        Frame::Line(text) => transport.send_line(text),
        Frame::Blob(data) => send_blob(transport, data),
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Read and parse one command line
///
/// An unrecognized verb is returned as `FtpError::UnknownCommand`; the
/// line has been fully consumed, so the session can reply and continue.
pub fn read_command<R: Read, W: Write>(transport: &mut Transport<R, W>) -> Result<Command> {
    let line = transport.recv_line()?;
    Command::parse(&line)
}

/// Write a command line
pub fn write_command<R: Read, W: Write>(
    transport: &mut Transport<R, W>,
    command: &Command,
) -> Result<()> {
    transport.send_line(&command.to_line())
}

// =============================================================================
// Status Lines
// =============================================================================

/// Read and parse one status line
pub fn read_status<R: Read, W: Write>(transport: &mut Transport<R, W>) -> Result<Status> {
    let line = transport.recv_line()?;
    Status::parse(&line)
}

/// Write a status line
pub fn write_status<R: Read, W: Write>(
    transport: &mut Transport<R, W>,
    status: &Status,
) -> Result<()> {
    write_frame(transport, &Frame::Line(status.to_line()))
}
