//! Command definitions
//!
//! Validates raw command text against the verb table and holds the parsed
//! result. A [`Command`] value is the "parsed" state; raw text is the
//! "unparsed" state.

use std::fmt;
use std::str::FromStr;

use crate::error::{DbError, Result};

/// Number of arguments a verb accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

/// Command verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    CreateDb,
    ListDbs,
    DeleteDb,
    UseDb,
    CreateTable,
    DeleteTable,
    ListTables,
    ReadTable,
    WriteTable,
    /// Declared, no handler
    Filter,
    /// Declared, no handler
    Sort,
}

impl Verb {
    pub const ALL: [Verb; 11] = [
        Verb::CreateDb,
        Verb::ListDbs,
        Verb::DeleteDb,
        Verb::UseDb,
        Verb::CreateTable,
        Verb::DeleteTable,
        Verb::ListTables,
        Verb::ReadTable,
        Verb::WriteTable,
        Verb::Filter,
        Verb::Sort,
    ];

    /// Wire name of the verb
    pub fn name(self) -> &'static str {
        match self {
            Verb::CreateDb => "CREATE-DB",
            Verb::ListDbs => "LIST-DBS",
            Verb::DeleteDb => "DELETE-DB",
            Verb::UseDb => "USE-DB",
            Verb::CreateTable => "CREATE-TABLE",
            Verb::DeleteTable => "DELETE-TABLE",
            Verb::ListTables => "LIST-TABLES",
            Verb::ReadTable => "READ-TABLE",
            Verb::WriteTable => "WRITE-TABLE",
            Verb::Filter => "FILTER",
            Verb::Sort => "SORT",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Verb::ListDbs => Arity::Fixed(0),
            Verb::WriteTable => Arity::Fixed(2),
            Verb::Filter | Verb::Sort => Arity::Variadic,
            _ => Arity::Fixed(1),
        }
    }

    /// Case-insensitive lookup
    pub fn from_name(name: &str) -> Option<Verb> {
        let upper = name.to_ascii_uppercase();
        Verb::ALL.into_iter().find(|verb| verb.name() == upper)
    }

    /// Verbs whose first argument names a table (or, for LIST-TABLES, the
    /// database holding tables). Clients qualify these with the current
    /// database.
    pub fn is_table_verb(self) -> bool {
        matches!(
            self,
            Verb::CreateTable
                | Verb::DeleteTable
                | Verb::ListTables
                | Verb::ReadTable
                | Verb::WriteTable
        )
    }

    /// Verbs that have a handler
    pub fn is_implemented(self) -> bool {
        !matches!(self, Verb::Filter | Verb::Sort)
    }
}

impl FromStr for Verb {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self> {
        Verb::from_name(s).ok_or(DbError::UnknownCommand)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: Verb,
    args: Vec<String>,
}

impl Command {
    /// Validate and split raw command text
    ///
    /// Fails with `INVALID COMMAND: <verb>` for an unknown verb and with
    /// `INVALID NUMBER OF ARGUMENTS` when the arity does not match.
    pub fn parse(text: &str) -> Result<Self> {
        let mut fields = text.split_whitespace();
        let raw_verb = fields.next().ok_or(DbError::EmptyCommand)?;
        let verb = Verb::from_name(raw_verb)
            .ok_or_else(|| DbError::InvalidCommand(raw_verb.to_string()))?;

        let args: Vec<String> = fields.map(str::to_string).collect();
        if !verb.arity().accepts(args.len()) {
            return Err(DbError::InvalidArgumentCount);
        }

        Ok(Self { verb, args })
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl FromStr for Command {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self> {
        Command::parse(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb.name())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
