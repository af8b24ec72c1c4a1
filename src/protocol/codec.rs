//! Protocol codec
//!
//! Content encoding for documents carried inside a command line, and the
//! line/length framing used on the socket.
//!
//! ## Content Encoding
//! - encode: spaces → [`SPACE_TOKEN`], then newlines → [`NEWLINE_TOKEN`]
//! - decode: newlines first, then spaces
//!
//! Input that already contains a token does not survive the round trip.
//!
//! ## Response Framing
//! ```text
//! ┌──────────────────┬─────────────────────────────┐
//! │ "<len>\n"        │         Payload             │
//! └──────────────────┴─────────────────────────────┘
//! ```

use std::io::{BufRead, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{DbError, Result};
use super::Response;

/// Replaces `'\n'` in encoded content
pub const NEWLINE_TOKEN: &str = "-n-e-w-l-i-n-e-";

/// Replaces `' '` in encoded content
pub const SPACE_TOKEN: &str = "-s-p-a-c-e-";

/// Maximum response payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Maximum request line size; encoded documents inflate, so allow the same
pub const MAX_LINE_SIZE: usize = MAX_PAYLOAD_SIZE;

// =============================================================================
// Content Encoding
// =============================================================================

/// Encode a document into a single token free of spaces and newlines
///
/// Other whitespace (`\t`, `\r`) is left as-is and would split the
/// request line; callers normalize or reject it first.
pub fn encode_content(content: &str) -> String {
    content
        .replace(' ', SPACE_TOKEN)
        .replace('\n', NEWLINE_TOKEN)
}

/// Reverse [`encode_content`]
pub fn decode_content(encoded: &str) -> Vec<u8> {
    encoded
        .replace(NEWLINE_TOKEN, "\n")
        .replace(SPACE_TOKEN, " ")
        .into_bytes()
}

// =============================================================================
// Request Lines
// =============================================================================

/// Read one command line
///
/// Returns `Ok(None)` when the peer closed the stream before sending
/// anything. The trailing `\n` / `\r\n` is stripped.
pub fn read_command<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_SIZE as u64 + 1)
        .read_until(b'\n', &mut line)?;

    if read == 0 {
        return Ok(None);
    }

    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }

    // Only a line cut off by the limit can still be this long
    if line.len() > MAX_LINE_SIZE {
        return Err(DbError::Protocol(format!(
            "Command line too long (max {} bytes)",
            MAX_LINE_SIZE
        )));
    }

    String::from_utf8(line)
        .map(Some)
        .map_err(|e| DbError::Protocol(format!("Command is not valid UTF-8: {}", e)))
}

/// Write one command line
pub fn write_command<W: Write>(writer: &mut W, command: &str) -> Result<()> {
    writer.write_all(command.trim_end_matches(['\r', '\n']).as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Framing
// =============================================================================

/// Frame a response payload
pub fn encode_response(response: &Response) -> Bytes {
    let payload = response.payload.as_bytes();
    let header = format!("{}\n", payload.len());

    let mut message = BytesMut::with_capacity(header.len() + payload.len());
    message.put_slice(header.as_bytes());
    message.put_slice(payload);
    message.freeze()
}

/// Write a framed response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let bytes = encode_response(response);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a framed response payload
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut header = String::new();
    if reader.read_line(&mut header)? == 0 {
        return Err(DbError::Protocol("Connection closed before response".to_string()));
    }

    let payload_len: usize = header.trim_end().parse().map_err(|_| {
        DbError::Protocol(format!("Invalid response length header: {:?}", header.trim_end()))
    })?;

    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(DbError::Protocol(format!(
            "Response payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let mut payload = vec![0u8; payload_len];
    reader.read_exact(&mut payload)?;

    String::from_utf8(payload)
        .map_err(|e| DbError::Protocol(format!("Response is not valid UTF-8: {}", e)))
}
