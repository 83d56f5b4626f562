//! Codec Tests
//!
//! Tests for reading and writing frames, commands and status lines over a
//! transport.

use std::io;
use minftp::FtpError;
use minftp::protocol::{
    Command, Frame, FrameKind, Status, Verb,
    read_frame, write_frame,
    read_command, write_command,
    read_status, write_status,
};
use minftp::transport::Transport;

// =============================================================================
// Helper Functions
// =============================================================================

fn encode<F>(write: F) -> Vec<u8>
where
    F: FnOnce(&mut Transport<io::Empty, Vec<u8>>),
{
    let mut t = Transport::new(io::empty(), Vec::new());
    write(&mut t);
    t.into_writer()
}

// =============================================================================
// Frame Tests
// =============================================================================

#[test]
fn test_write_line_frame() {
    let wire = encode(|t| write_frame(t, &Frame::Line("pwd".to_string())).unwrap());
    assert_eq!(wire, b"pwd\n");
}

#[test]
fn test_write_blob_frame() {
    let wire = encode(|t| write_frame(t, &Frame::Blob(b"a.txt\nb\n".to_vec())).unwrap());

    assert_eq!(&wire[..8], &8u64.to_le_bytes());
    assert_eq!(&wire[8..], b"a.txt\nb\n");
}

#[test]
fn test_read_frames_in_sequence() {
    let frames = vec![
        Frame::Line("OK".to_string()),
        Frame::Blob(b"/srv/files\n".to_vec()),
        Frame::Line("ERR Failed to change directory.".to_string()),
        Frame::Blob(Vec::new()),
    ];

    let wire = encode(|t| {
        for frame in &frames {
            write_frame(t, frame).unwrap();
        }
    });

    let mut t = Transport::new(wire.as_slice(), Vec::new());
    for expected in &frames {
        let frame = read_frame(&mut t, expected.kind()).unwrap();
        assert_eq!(&frame, expected);
    }
    assert!(matches!(
        read_frame(&mut t, FrameKind::Line),
        Err(FtpError::ConnectionClosed)
    ));
}

#[test]
fn test_frame_kind() {
    assert_eq!(Frame::Line("x".to_string()).kind(), FrameKind::Line);
    assert_eq!(Frame::Blob(vec![1]).kind(), FrameKind::Blob);
}

// =============================================================================
// Command Stream Tests
// =============================================================================

#[test]
fn test_stream_multiple_commands() {
    let commands = vec![
        Command::new(Verb::Pwd),
        Command::with_argument(Verb::Cd, "sub dir"),
        Command::with_argument(Verb::Get, "sub dir/file.bin"),
        Command::new(Verb::Quit),
    ];

    let wire = encode(|t| {
        for command in &commands {
            write_command(t, command).unwrap();
        }
    });
    assert_eq!(
        wire,
        b"pwd\ncd sub dir\nget sub dir/file.bin\nquit\n"
    );

    let mut t = Transport::new(wire.as_slice(), Vec::new());
    for expected in &commands {
        assert_eq!(&read_command(&mut t).unwrap(), expected);
    }
}

#[test]
fn test_unknown_command_consumes_its_line() {
    let mut t = Transport::new(&b"frobnicate\nls\n"[..], Vec::new());

    assert!(matches!(read_command(&mut t), Err(FtpError::UnknownCommand(_))));
    assert_eq!(read_command(&mut t).unwrap().verb, Verb::Ls);
}

#[test]
fn test_write_command_rejects_newline_in_argument() {
    let mut t = Transport::new(io::empty(), Vec::new());
    let result = write_command(&mut t, &Command::with_argument(Verb::Cd, "a\nquit"));

    assert!(matches!(result, Err(FtpError::Protocol(_))));
}

// =============================================================================
// Status Stream Tests
// =============================================================================

#[test]
fn test_stream_status_lines() {
    let wire = encode(|t| {
        write_status(t, &Status::Ok).unwrap();
        write_status(t, &Status::err("Unknown command.")).unwrap();
    });
    assert_eq!(wire, b"OK\nERR Unknown command.\n");

    let mut t = Transport::new(wire.as_slice(), Vec::new());
    assert_eq!(read_status(&mut t).unwrap(), Status::Ok);
    assert_eq!(read_status(&mut t).unwrap(), Status::err("Unknown command."));
}

#[test]
fn test_read_status_rejects_garbage() {
    let mut t = Transport::new(&b"HELLO\n"[..], Vec::new());
    assert!(matches!(read_status(&mut t), Err(FtpError::Protocol(_))));
}
