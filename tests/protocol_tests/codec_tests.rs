//! Codec Tests
//!
//! Tests for content encoding and line/length framing.

use std::io::Cursor;

use yamldb::protocol::{
    decode_content, encode_content, encode_response, read_command, read_response,
    write_command, write_response, Response, NEWLINE_TOKEN, SPACE_TOKEN,
};
use yamldb::DbError;

// =============================================================================
// Content Encoding Tests
// =============================================================================

#[test]
fn test_encode_replaces_spaces_and_newlines() {
    let encoded = encode_content("name: pen\nprice: 5");

    assert_eq!(encoded, "name:-s-p-a-c-e-pen-n-e-w-l-i-n-e-price:-s-p-a-c-e-5");
    assert!(!encoded.contains(' '));
    assert!(!encoded.contains('\n'));
}

#[test]
fn test_decode_restores_document() {
    let document = "row:\n  name: fountain pen\n  price: 12.5\n";
    let encoded = encode_content(document);

    assert_eq!(decode_content(&encoded), document.as_bytes());
}

#[test]
fn test_encode_empty() {
    assert_eq!(encode_content(""), "");
    assert!(decode_content("").is_empty());
}

#[test]
fn test_encode_only_whitespace() {
    let encoded = encode_content(" \n ");

    assert_eq!(encoded, format!("{}{}{}", SPACE_TOKEN, NEWLINE_TOKEN, SPACE_TOKEN));
    assert_eq!(decode_content(&encoded), b" \n ".to_vec());
}

#[test]
fn test_decode_plain_text_is_unchanged() {
    assert_eq!(decode_content("no-tokens-here"), b"no-tokens-here".to_vec());
}

#[test]
fn test_sentinel_in_input_is_lossy() {
    // A literal token in the source document comes back as whitespace
    let document = format!("a{}b", SPACE_TOKEN);
    let decoded = decode_content(&encode_content(&document));

    assert_eq!(decoded, b"a b".to_vec());
}

// =============================================================================
// Request Line Tests
// =============================================================================

#[test]
fn test_read_command_strips_newline() {
    let mut reader = Cursor::new(b"LIST-DBS\n".to_vec());

    assert_eq!(read_command(&mut reader).unwrap(), Some("LIST-DBS".to_string()));
    assert_eq!(read_command(&mut reader).unwrap(), None);
}

#[test]
fn test_read_command_strips_crlf() {
    let mut reader = Cursor::new(b"USE-DB shop\r\n".to_vec());

    assert_eq!(read_command(&mut reader).unwrap(), Some("USE-DB shop".to_string()));
}

#[test]
fn test_read_command_without_trailing_newline() {
    let mut reader = Cursor::new(b"LIST-DBS".to_vec());

    assert_eq!(read_command(&mut reader).unwrap(), Some("LIST-DBS".to_string()));
}

#[test]
fn test_read_multiple_commands() {
    let mut reader = Cursor::new(b"CREATE-DB a\nCREATE-DB b\n\nLIST-DBS\n".to_vec());

    assert_eq!(read_command(&mut reader).unwrap().as_deref(), Some("CREATE-DB a"));
    assert_eq!(read_command(&mut reader).unwrap().as_deref(), Some("CREATE-DB b"));
    assert_eq!(read_command(&mut reader).unwrap().as_deref(), Some(""));
    assert_eq!(read_command(&mut reader).unwrap().as_deref(), Some("LIST-DBS"));
    assert_eq!(read_command(&mut reader).unwrap(), None);
}

#[test]
fn test_read_command_rejects_invalid_utf8() {
    let mut reader = Cursor::new(vec![0xff, 0xfe, b'\n']);

    let result = read_command(&mut reader);
    assert!(matches!(result, Err(DbError::Protocol(_))));
}

#[test]
fn test_write_command_appends_single_newline() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, "LIST-DBS\n").unwrap();

    assert_eq!(buffer, b"LIST-DBS\n");
}

// =============================================================================
// Response Framing Tests
// =============================================================================

#[test]
fn test_encode_response_prefixes_length() {
    let bytes = encode_response(&Response::ok("hello"));

    assert_eq!(&bytes[..], b"5\nhello");
}

#[test]
fn test_error_and_ok_framed_identically() {
    let ok = encode_response(&Response::ok("DB ALREADY EXISTS"));
    let err = encode_response(&Response::error("DB ALREADY EXISTS"));

    assert_eq!(ok, err);
}

#[test]
fn test_encode_empty_response() {
    let bytes = encode_response(&Response::ok(""));

    assert_eq!(&bytes[..], b"0\n");
}

#[test]
fn test_response_length_counts_bytes() {
    // 'é' is two bytes in UTF-8
    let bytes = encode_response(&Response::ok("é"));

    assert_eq!(&bytes[..], "2\né".as_bytes());
}

#[test]
fn test_write_then_read_multiline_response() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, &Response::ok("name|price\npen|5")).unwrap();

    let mut reader = Cursor::new(buffer);
    assert_eq!(read_response(&mut reader).unwrap(), "name|price\npen|5");
}

#[test]
fn test_read_consecutive_responses() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, &Response::ok("SHOP")).unwrap();
    write_response(&mut buffer, &Response::error("DB DOES NOT EXISTS")).unwrap();

    let mut reader = Cursor::new(buffer);
    assert_eq!(read_response(&mut reader).unwrap(), "SHOP");
    assert_eq!(read_response(&mut reader).unwrap(), "DB DOES NOT EXISTS");
}

#[test]
fn test_read_response_bad_header() {
    let mut reader = Cursor::new(b"abc\nhello".to_vec());

    assert!(matches!(read_response(&mut reader), Err(DbError::Protocol(_))));
}

#[test]
fn test_read_response_truncated_payload() {
    let mut reader = Cursor::new(b"10\nshort".to_vec());

    assert!(matches!(read_response(&mut reader), Err(DbError::Io(_))));
}

#[test]
fn test_read_response_on_closed_stream() {
    let mut reader = Cursor::new(Vec::new());

    assert!(matches!(read_response(&mut reader), Err(DbError::Protocol(_))));
}
