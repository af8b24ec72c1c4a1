//! Tests for the client session
//!
//! These tests verify:
//! - Qualification of table names with the current database
//! - USE-DB handling
//! - WRITE-TABLE payload preparation from document files

use std::fs;

use tempfile::TempDir;
use yamldb::network::{prepare_write_payload, Prepared, Session};
use yamldb::protocol::decode_content;

// =============================================================================
// Helper Functions
// =============================================================================

fn session_in(db: &str) -> Session {
    let mut session = Session::new();
    let line = format!("USE-DB {}", db);
    session.observe(&line, &db.to_uppercase());
    session
}

fn sent(prepared: Prepared) -> String {
    match prepared {
        Prepared::Send(line) => line,
        Prepared::Local(message) => panic!("expected a command, got local message {:?}", message),
    }
}

// =============================================================================
// Prepare Tests
// =============================================================================

#[test]
fn test_empty_input_stays_local() {
    let session = Session::new();

    assert_eq!(session.prepare("   "), Prepared::Local("No input provided".to_string()));
}

#[test]
fn test_database_verbs_pass_through() {
    let session = Session::new();

    assert_eq!(sent(session.prepare("create-db  shop")), "create-db shop");
    assert_eq!(sent(session.prepare("LIST-DBS")), "LIST-DBS");
}

#[test]
fn test_unknown_verb_is_sent() {
    let session = Session::new();

    assert_eq!(sent(session.prepare("bogus items")), "bogus items");
}

#[test]
fn test_table_verb_without_database() {
    let session = Session::new();

    assert_eq!(
        session.prepare("read-table items"),
        Prepared::Local("OPEN A DATABASE FIRST: 'use-db <db-name>'".to_string())
    );
    assert!(matches!(session.prepare("list-tables"), Prepared::Local(_)));
}

#[test]
fn test_qualified_name_kept() {
    let session = Session::new();

    assert_eq!(sent(session.prepare("read-table shop:items")), "read-table shop:items");
}

#[test]
fn test_table_name_qualified_with_current_db() {
    let session = session_in("shop");

    assert_eq!(sent(session.prepare("read-table items")), "read-table SHOP:items");
    assert_eq!(sent(session.prepare("delete-table items")), "delete-table SHOP:items");
    assert_eq!(sent(session.prepare("list-tables")), "list-tables SHOP");
    assert_eq!(sent(session.prepare("list-tables hr")), "list-tables hr");
}

#[test]
fn test_missing_table_argument_sent_as_is() {
    let session = session_in("shop");

    assert_eq!(sent(session.prepare("read-table")), "read-table");
}

// =============================================================================
// Observe Tests
// =============================================================================

#[test]
fn test_use_db_switches_on_match() {
    let mut session = Session::new();

    let message = session.observe("use-db shop", "SHOP");
    assert_eq!(message.as_deref(), Some("DEFAULT DB SET TO: SHOP"));
    assert_eq!(session.current_db(), Some("SHOP"));
}

#[test]
fn test_use_db_error_keeps_state() {
    let mut session = session_in("shop");

    assert_eq!(session.observe("use-db ghost", "DB DOES NOT EXISTS"), None);
    assert_eq!(session.current_db(), Some("SHOP"));
}

#[test]
fn test_other_responses_ignored() {
    let mut session = Session::new();

    assert_eq!(session.observe("list-dbs", "SHOP"), None);
    assert_eq!(session.current_db(), None);
}

// =============================================================================
// Write Payload Tests
// =============================================================================

#[test]
fn test_payload_from_missing_file() {
    let temp = TempDir::new().unwrap();

    assert_eq!(prepare_write_payload(&temp.path().join("nope.yaml")), "NO-DATA");
}

#[test]
fn test_payload_from_invalid_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.yaml");

    for content in ["", "  \n", "- a\n- b\n", "name: [oops"] {
        fs::write(&path, content).unwrap();
        assert_eq!(prepare_write_payload(&path), "INVALID-DATA", "for {:?}", content);
    }
}

#[test]
fn test_payload_is_encoded_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pen.yaml");
    fs::write(&path, "name: blue pen\nprice: 5\n").unwrap();

    let payload = prepare_write_payload(&path);

    assert!(!payload.contains(' '));
    assert!(!payload.contains('\n'));
    assert_eq!(decode_content(&payload), b"name: blue pen\nprice: 5\n");
}

#[test]
fn test_payload_from_crlf_file_is_normalized() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pen.yaml");
    fs::write(&path, "name: pen\r\nprice: 5\r\n").unwrap();

    let payload = prepare_write_payload(&path);

    assert!(!payload.contains(char::is_whitespace));
    assert_eq!(decode_content(&payload), b"name: pen\nprice: 5\n");
}

#[test]
fn test_payload_with_unencodable_whitespace_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.yaml");

    for content in ["name:\tpen\n", "name: pen\rprice: 5\n", "name: \"a\u{2003}b\"\n"] {
        fs::write(&path, content).unwrap();
        assert_eq!(prepare_write_payload(&path), "INVALID-DATA", "for {:?}", content);
    }
}

#[test]
fn test_payload_from_non_utf8_file_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bin.yaml");
    fs::write(&path, [b'a', 0xff, b':', b' ', b'b', b'\n']).unwrap();

    assert_eq!(prepare_write_payload(&path), "INVALID-DATA");
}

#[test]
fn test_write_table_line_carries_payload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pen.yaml");
    fs::write(&path, "name: pen\n").unwrap();
    let session = session_in("shop");

    let line = sent(session.prepare(&format!("write-table items {}", path.display())));

    assert_eq!(line, "write-table SHOP:items name:-s-p-a-c-e-pen-n-e-w-l-i-n-e-");
}
