//! Command Tests
//!
//! Verb lookup, arity validation and argument splitting.

use yamldb::protocol::{Arity, Command, Verb};
use yamldb::DbError;

// =============================================================================
// Verb Table Tests
// =============================================================================

#[test]
fn test_verb_arities() {
    assert_eq!(Verb::CreateDb.arity(), Arity::Fixed(1));
    assert_eq!(Verb::ListDbs.arity(), Arity::Fixed(0));
    assert_eq!(Verb::DeleteDb.arity(), Arity::Fixed(1));
    assert_eq!(Verb::UseDb.arity(), Arity::Fixed(1));
    assert_eq!(Verb::CreateTable.arity(), Arity::Fixed(1));
    assert_eq!(Verb::DeleteTable.arity(), Arity::Fixed(1));
    assert_eq!(Verb::ListTables.arity(), Arity::Fixed(1));
    assert_eq!(Verb::ReadTable.arity(), Arity::Fixed(1));
    assert_eq!(Verb::WriteTable.arity(), Arity::Fixed(2));
    assert_eq!(Verb::Filter.arity(), Arity::Variadic);
    assert_eq!(Verb::Sort.arity(), Arity::Variadic);
}

#[test]
fn test_verb_names_round_trip() {
    for verb in Verb::ALL {
        assert_eq!(Verb::from_name(verb.name()), Some(verb));
    }
}

#[test]
fn test_verb_lookup_is_case_insensitive() {
    assert_eq!(Verb::from_name("create-db"), Some(Verb::CreateDb));
    assert_eq!(Verb::from_name("Read-Table"), Some(Verb::ReadTable));
}

#[test]
fn test_unknown_verb() {
    assert_eq!(Verb::from_name("CREATE"), None);
    assert_eq!(Verb::from_name("CREATE TABLE"), None);

    let err = "CREATE".parse::<Verb>().unwrap_err();
    assert_eq!(err.to_string(), "INVALID COMMAND");
    assert_eq!("list-dbs".parse::<Verb>().unwrap(), Verb::ListDbs);
}

#[test]
fn test_declared_only_verbs() {
    assert!(!Verb::Filter.is_implemented());
    assert!(!Verb::Sort.is_implemented());
    assert!(Verb::WriteTable.is_implemented());
}

// =============================================================================
// Parse Tests
// =============================================================================

#[test]
fn test_parse_splits_on_whitespace() {
    let command = Command::parse("  WRITE-TABLE   shop:items\tpayload  ").unwrap();

    assert_eq!(command.verb(), Verb::WriteTable);
    assert_eq!(command.args(), ["shop:items", "payload"]);
}

#[test]
fn test_parse_no_arguments() {
    let command = Command::parse("list-dbs").unwrap();

    assert_eq!(command.verb(), Verb::ListDbs);
    assert!(command.args().is_empty());
    assert_eq!(command.arg(0), None);
}

#[test]
fn test_parse_unknown_verb_names_it() {
    let err = Command::parse("DROP shop").unwrap_err();

    assert!(matches!(err, DbError::InvalidCommand(ref verb) if verb == "DROP"));
    assert_eq!(err.to_string(), "INVALID COMMAND: DROP");
}

#[test]
fn test_parse_wrong_arity() {
    for text in ["CREATE-DB", "CREATE-DB a b", "LIST-DBS x", "WRITE-TABLE a:b", "READ-TABLE"] {
        let err = Command::parse(text).unwrap_err();
        assert_eq!(err.to_string(), "INVALID NUMBER OF ARGUMENTS", "for {:?}", text);
    }
}

#[test]
fn test_parse_variadic_accepts_any_count() {
    assert!(Command::parse("FILTER").is_ok());
    assert!(Command::parse("SORT a:b price desc").is_ok());
}

#[test]
fn test_parse_empty_line() {
    assert!(matches!(Command::parse(""), Err(DbError::EmptyCommand)));
    assert!(matches!(Command::parse("   \t "), Err(DbError::EmptyCommand)));
}

#[test]
fn test_from_str() {
    let command: Command = "use-db shop".parse().unwrap();

    assert_eq!(command.verb(), Verb::UseDb);
    assert_eq!(command.arg(0), Some("shop"));
}

#[test]
fn test_display_uses_canonical_verb() {
    let command = Command::parse("create-table shop:items").unwrap();

    assert_eq!(command.to_string(), "CREATE-TABLE shop:items");
}
