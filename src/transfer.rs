//! Transfer Encoding
//!
//! Bulk data on the wire is a length prefix followed by exactly that many
//! raw bytes, with no terminator and no checksum:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │ Len (8, LE)  │        Len raw bytes         │
//! └──────────────┴──────────────────────────────┘
//! ```
//!
//! The same encoding carries command output, directory listings, and file
//! contents in both directions. Bytes move in chunks of the transport's
//! chunk size so files never have to fit in memory.
//!
//! A receive that stops early leaves whatever already reached the sink in
//! place. Callers treat any error as a failed transfer.

use std::io::{self, Read, Write};

use crate::error::{FtpError, Result};
use crate::transport::{chunk_for, Transport};

/// Send `data` as one blob
pub fn send_blob<R: Read, W: Write>(transport: &mut Transport<R, W>, data: &[u8]) -> Result<()> {
    transport.send_u64(data.len() as u64)?;
    transport.send_all(data)?;
    transport.flush()
}

/// Stream `len` bytes from `source` as one blob
///
/// The prefix goes out before the first byte is read, so if `source` runs
/// dry early the blob can no longer be completed; this is reported as a
/// protocol error and the session has to end.
pub fn send_blob_from<R: Read, W: Write, S: Read>(
    transport: &mut Transport<R, W>,
    source: &mut S,
    len: u64,
) -> Result<()> {
    transport.send_u64(len)?;

    let mut buf = vec![0u8; chunk_for(len, transport.chunk_size())];
    let mut remaining = len;
    while remaining > 0 {
        let want = chunk_for(remaining, buf.len());
        let n = match source.read(&mut buf[..want]) {
            Ok(0) => {
                return Err(FtpError::Protocol(format!(
                    "Source ended with {} of {} blob bytes unsent",
                    remaining, len
                )))
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        transport.send_all(&buf[..n])?;
        remaining -= n as u64;
    }

    transport.flush()
}

/// Receive a blob of `len` bytes (prefix already read) into `sink`
///
/// A failing sink yields [`FtpError::Sink`] carrying the number of blob
/// bytes still on the wire, so the caller can [`Transport::discard`] them.
pub fn recv_blob<R: Read, W: Write, S: Write>(
    transport: &mut Transport<R, W>,
    sink: &mut S,
    len: u64,
) -> Result<u64> {
    let mut buf = vec![0u8; chunk_for(len, transport.chunk_size())];
    let mut remaining = len;
    while remaining > 0 {
        let want = chunk_for(remaining, buf.len());
        let n = transport.recv_some(&mut buf[..want])?;
        remaining -= n as u64;
        sink.write_all(&buf[..n])
            .map_err(|source| FtpError::Sink { remaining, source })?;
    }

    sink.flush()
        .map_err(|source| FtpError::Sink { remaining: 0, source })?;
    Ok(len)
}

/// Receive a whole blob, prefix included, into memory
pub fn recv_blob_to_vec<R: Read, W: Write>(transport: &mut Transport<R, W>) -> Result<Vec<u8>> {
    let len = transport.recv_u64()?;
    let capacity = chunk_for(len, transport.chunk_size());
    let mut data = Vec::with_capacity(capacity);
    recv_blob(transport, &mut data, len)?;
    Ok(data)
}

/// Receive a blob into `sink`, draining the rest of it if `sink` fails
///
/// Returns the sink's error after the stream is realigned, so the session
/// can continue with the next frame.
pub fn recv_blob_or_drain<R: Read, W: Write, S: Write>(
    transport: &mut Transport<R, W>,
    sink: &mut S,
    len: u64,
) -> Result<u64> {
    match recv_blob(transport, sink, len) {
        Err(FtpError::Sink { remaining, source }) => {
            transport.discard(remaining)?;
            Err(FtpError::Sink { remaining: 0, source })
        }
        other => other,
    }
}
