//! Stream transport
//!
//! Reads are buffered. Every read, line or blob, must go through the same
//! reader or buffered bytes would be lost. Writes are unbuffered.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;

use bytes::BytesMut;

use crate::config::{DEFAULT_MAX_LINE_LEN, DEFAULT_SERVER_CHUNK};
use crate::error::{FtpError, Result};

/// Size of the length prefix on the wire
pub const LENGTH_PREFIX_SIZE: usize = 8;

/// Lines start with this much buffer and grow on demand
const INITIAL_LINE_CAPACITY: usize = 128;

/// Transport over a TCP connection
pub type TcpTransport = Transport<TcpStream, TcpStream>;

/// One side of a session's byte stream
pub struct Transport<R: Read, W: Write> {
    /// Buffered read half
    reader: BufReader<R>,

    /// Write half
    writer: W,

    /// Longest line kept by `recv_line`, terminator included
    max_line_len: usize,

    /// Largest single read/write used when moving bulk data
    chunk_size: usize,
}

impl TcpTransport {
    /// Split a TCP stream into a transport
    pub fn from_tcp(stream: TcpStream) -> Result<Self> {
        let read_stream = stream.try_clone()?;
        Ok(Self::new(read_stream, stream))
    }
}

impl<R: Read, W: Write> Transport<R, W> {
    /// Create a transport from separate read and write halves
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            chunk_size: DEFAULT_SERVER_CHUNK,
        }
    }

    /// Override the line bound and bulk chunk size
    pub fn with_limits(mut self, max_line_len: usize, chunk_size: usize) -> Self {
        self.max_line_len = max_line_len;
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    // =========================================================================
    // Sending
    // =========================================================================

    /// Write as much of `buf` as the peer accepts
    ///
    /// Returns the number of bytes sent. A short count means the writer
    /// reported a zero-byte write; the caller decides whether that matters.
    pub fn send_exact(&mut self, buf: &[u8]) -> Result<usize> {
        let mut sent = 0;
        while sent < buf.len() {
            match self.writer.write(&buf[sent..]) {
                Ok(0) => break,
                Ok(n) => sent += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(sent)
    }

    /// Write all of `buf`, treating a short write as a closed connection
    pub fn send_all(&mut self, buf: &[u8]) -> Result<()> {
        let sent = self.send_exact(buf)?;
        if sent < buf.len() {
            tracing::trace!("Short write: {} of {} bytes", sent, buf.len());
            return Err(FtpError::ConnectionClosed);
        }
        Ok(())
    }

    /// Send `text` followed by `\n`
    pub fn send_line(&mut self, text: &str) -> Result<()> {
        if text.contains('\n') {
            return Err(FtpError::Protocol(format!(
                "Line contains an embedded newline: {:?}",
                text
            )));
        }

        let mut line = Vec::with_capacity(text.len() + 1);
        line.extend_from_slice(text.as_bytes());
        line.push(b'\n');

        self.send_all(&line)?;
        self.flush()
    }

    /// Send a length prefix
    pub fn send_u64(&mut self, value: u64) -> Result<()> {
        self.send_all(&value.to_le_bytes())
    }

    /// Flush the write half
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.writer.flush() {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    // =========================================================================
    // Receiving
    // =========================================================================

    /// Read at least one byte into `buf`
    ///
    /// Returns `ConnectionClosed` when the peer has shut down its side.
    pub fn recv_some(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            match self.reader.read(buf) {
                Ok(0) => return Err(FtpError::ConnectionClosed),
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Fill `buf` completely
    pub fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            filled += self.recv_some(&mut buf[filled..])?;
        }
        Ok(())
    }

    /// Receive a length prefix
    pub fn recv_u64(&mut self) -> Result<u64> {
        let mut raw = [0u8; LENGTH_PREFIX_SIZE];
        self.recv_exact(&mut raw)?;
        Ok(u64::from_le_bytes(raw))
    }

    /// Receive one line using the configured bound
    pub fn recv_line(&mut self) -> Result<String> {
        self.recv_line_with_limit(self.max_line_len)
    }

    /// Receive one line, keeping at most `max_len - 1` bytes
    ///
    /// Bytes past the bound are still consumed up to the `\n` so the next
    /// frame starts in the right place. The terminator is never returned.
    ///
    /// Lines are ASCII on the wire. Invalid UTF-8 is replaced with U+FFFD,
    /// so names that are not UTF-8 cannot be addressed.
    pub fn recv_line_with_limit(&mut self, max_len: usize) -> Result<String> {
        let keep = max_len.saturating_sub(1);
        let mut line = BytesMut::with_capacity(keep.min(INITIAL_LINE_CAPACITY));
        let mut dropped = 0usize;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if available.is_empty() {
                return Err(FtpError::ConnectionClosed);
            }

            let newline = available.iter().position(|&b| b == b'\n');
            let content = &available[..newline.unwrap_or(available.len())];

            let take = content.len().min(keep - line.len());
            line.extend_from_slice(&content[..take]);
            dropped += content.len() - take;

            let consumed = newline.map_or(content.len(), |pos| pos + 1);
            self.reader.consume(consumed);

            if newline.is_some() {
                break;
            }
        }

        if dropped > 0 {
            tracing::warn!(
                "Line exceeded {} bytes, dropped {} trailing bytes",
                keep,
                dropped
            );
        }

        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Read and throw away exactly `len` bytes
    pub fn discard(&mut self, len: u64) -> Result<()> {
        let mut scratch = vec![0u8; chunk_for(len, self.chunk_size)];
        let mut remaining = len;
        while remaining > 0 {
            let want = chunk_for(remaining, scratch.len());
            let n = self.recv_some(&mut scratch[..want])?;
            remaining -= n as u64;
        }
        tracing::trace!("Discarded {} payload bytes", len);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the write half
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the transport, returning the write half
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Size of the next chunk when `remaining` bytes are left
pub(crate) fn chunk_for(remaining: u64, chunk_size: usize) -> usize {
    usize::try_from(remaining).map_or(chunk_size, |r| r.min(chunk_size))
}
