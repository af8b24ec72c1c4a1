//! Name validation
//!
//! Database and table names are upper-cased and must be usable as a single
//! path component. Tables are always addressed as `DATABASE:TABLE`.

use std::fmt;

use crate::error::{DbError, Result};

/// Separator between database and table in a qualified name
pub const NAMESPACE_SEPARATOR: char = ':';

/// Suffix of a database directory
pub const DB_SUFFIX: &str = ".db";

/// Suffix of a table file
pub const TABLE_SUFFIX: &str = ".tbl";

/// A normalized database name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseName(String);

impl DatabaseName {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.contains(NAMESPACE_SEPARATOR) || !is_path_safe(raw) {
            return Err(DbError::InvalidDbName);
        }
        Ok(Self(raw.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory name under the storage root
    pub fn dir_name(&self) -> String {
        format!("{}{}", self.0, DB_SUFFIX)
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A normalized `DATABASE:TABLE` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    database: DatabaseName,
    table: String,
}

impl QualifiedName {
    /// Split and validate `db:table`
    ///
    /// More than one separator is rejected before anything else is checked.
    pub fn parse(raw: &str) -> Result<Self> {
        let pieces: Vec<&str> = raw.split(NAMESPACE_SEPARATOR).collect();
        match pieces.as_slice() {
            [database, table] => {
                if !is_path_safe(database) || !is_path_safe(table) {
                    return Err(DbError::InvalidTableName);
                }
                Ok(Self {
                    database: DatabaseName(database.to_uppercase()),
                    table: table.to_uppercase(),
                })
            }
            [_] => Err(DbError::InvalidTableName),
            _ => Err(DbError::TooManySeparators),
        }
    }

    pub fn database(&self) -> &DatabaseName {
        &self.database
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// File name inside the database directory
    pub fn file_name(&self) -> String {
        format!("{}{}", self.table, TABLE_SUFFIX)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.database, NAMESPACE_SEPARATOR, self.table)
    }
}

fn is_path_safe(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
