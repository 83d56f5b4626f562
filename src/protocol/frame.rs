//! Frame definitions
//!
//! A frame is one self-delimited unit on the wire.

/// Which frame the reader expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Line,
    Blob,
}

/// One unit on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Text terminated by `\n` (terminator not stored)
    Line(String),

    /// Length-prefixed raw bytes (prefix not stored)
    Blob(Vec<u8>),
}

impl Frame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Line(_) => FrameKind::Line,
            Frame::Blob(_) => FrameKind::Blob,
        }
    }
}
