//! Client
//!
//! Sends one console line at a time and consumes the reply according to
//! the verb: a text blob, a file download, or a file upload.

use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::{Path, PathBuf};

use crate::config::ClientConfig;
use crate::error::{FtpError, Result};
use crate::protocol::{read_status, write_frame, Frame, Status, Verb};
use crate::transfer::{recv_blob_or_drain, send_blob_from};
use crate::transport::{TcpTransport, Transport};
use super::Flow;

/// Client side of a session
pub struct Client<R: Read, W: Write> {
    transport: Transport<R, W>,

    /// Downloads land here; relative upload paths are read from here
    local_dir: PathBuf,
}

impl Client<TcpStream, TcpStream> {
    /// Connect to the configured server
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let stream = TcpStream::connect(&config.server_addr)?;
        stream.set_nodelay(true)?;
        tracing::info!("Connected to {}", config.server_addr);

        let transport: TcpTransport =
            Transport::from_tcp(stream)?.with_limits(config.max_line_len, config.chunk_size);
        Ok(Self::new(transport, &config.local_dir))
    }
}

impl<R: Read, W: Write> Client<R, W> {
    pub fn new(transport: Transport<R, W>, local_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            local_dir: local_dir.into(),
        }
    }

    /// Consume the client, returning its transport
    pub fn into_transport(self) -> Transport<R, W> {
        self.transport
    }

    /// Send one line of user input and consume the reply
    ///
    /// Command output and progress go to `out`, server errors and local
    /// failures to `err`. Returns `Err` only when the session can no longer
    /// continue.
    pub fn run_command<O: Write, E: Write>(
        &mut self,
        input: &str,
        out: &mut O,
        err: &mut E,
    ) -> Result<Flow> {
        let line = input.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let verb = Verb::classify(line);
        let argument = line.split_once(' ').map_or("", |(_, rest)| rest);

        // Check the upload source before the server creates anything.
        let upload = if verb == Some(Verb::Put) {
            match open_upload(&self.local_path(argument)) {
                Ok(upload) => Some(upload),
                Err(e) => {
                    writeln!(err, "{}: {}", argument, e)?;
                    return Ok(Flow::Continue);
                }
            }
        } else {
            None
        };

        write_frame(&mut self.transport, &Frame::Line(line.to_string()))?;

        let status = read_status(&mut self.transport)?;
        if let Status::Err(_) = &status {
            writeln!(err, "{}", status)?;
            return Ok(if verb == Some(Verb::Quit) {
                Flow::Quit
            } else {
                Flow::Continue
            });
        }

        match (verb, upload) {
            (Some(Verb::Quit), _) => return Ok(Flow::Quit),
            (Some(Verb::Get), _) => self.download(argument, out, err)?,
            (Some(Verb::Put), Some((mut file, len))) => self.upload(&mut file, len, out, err)?,
            _ => self.print_text(out, err)?,
        }
        Ok(Flow::Continue)
    }

    /// Send `quit` and wait for the server's reply
    pub fn quit<E: Write>(&mut self, err: &mut E) -> Result<()> {
        self.run_command(Verb::Quit.as_str(), &mut std::io::sink(), err)?;
        Ok(())
    }

    // =========================================================================
    // Reply Handling
    // =========================================================================

    fn print_text<O: Write, E: Write>(&mut self, out: &mut O, err: &mut E) -> Result<()> {
        let len = self.transport.recv_u64()?;
        match recv_blob_or_drain(&mut self.transport, out, len) {
            Ok(_) => Ok(()),
            Err(FtpError::Sink { source, .. }) => {
                writeln!(err, "Failed to write output: {}", source)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn download<O: Write, E: Write>(&mut self, remote: &str, out: &mut O, err: &mut E) -> Result<()> {
        let len = self.transport.recv_u64()?;

        let name = remote_basename(remote);
        let local = self.local_dir.join(name);
        let created = if name.is_empty() {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "no file name in remote path",
            ))
        } else {
            File::create(&local)
        };

        let mut file = match created {
            Ok(file) => file,
            Err(e) => {
                writeln!(err, "{}: {}", local.display(), e)?;
                return self.transport.discard(len);
            }
        };

        match recv_blob_or_drain(&mut self.transport, &mut file, len) {
            Ok(received) => {
                tracing::debug!("Downloaded {} bytes to {}", received, local.display());
                writeln!(out, "Downloaded {}", name)?;
                Ok(())
            }
            Err(FtpError::Sink { source, .. }) => {
                writeln!(err, "{}: {}", local.display(), source)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn upload<O: Write, E: Write>(
        &mut self,
        file: &mut File,
        len: u64,
        out: &mut O,
        err: &mut E,
    ) -> Result<()> {
        send_blob_from(&mut self.transport, file, len)?;

        match read_status(&mut self.transport)? {
            Status::Ok => writeln!(out, "Upload complete.")?,
            status => writeln!(err, "{}", status)?,
        }
        Ok(())
    }

    fn local_path(&self, path: &str) -> PathBuf {
        self.local_dir.join(path)
    }
}

/// Last `/`-separated segment of a remote path
pub fn remote_basename(remote: &str) -> &str {
    remote.rsplit('/').next().unwrap_or(remote)
}

fn open_upload(path: &Path) -> std::io::Result<(File, u64)> {
    let file = File::open(path)?;
    let meta = file.metadata()?;
    if !meta.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    Ok((file, meta.len()))
}
