//! Table model, parsing and rendering

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::{DbError, Result};
use super::record::{is_blank, kind_of};
use super::{key_to_string, Record};

/// Prefix of every generated row id
pub const ROW_ID_PREFIX: &str = "row_id_";

/// A parsed table: row id → record, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: IndexMap<String, Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row_id: impl Into<String>, record: Record) -> Option<Record> {
        self.rows.insert(row_id.into(), record)
    }

    pub fn get(&self, row_id: &str) -> Option<&Record> {
        self.rows.get(row_id)
    }

    pub fn contains_row(&self, row_id: &str) -> bool {
        self.rows.contains_key(row_id)
    }

    /// First row in document order; defines the table's columns
    pub fn first_row(&self) -> Option<&Record> {
        self.rows.values().next()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.rows.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse a whole table document
///
/// An empty document or `{}` is a table with no rows. A row whose body is
/// not a flat mapping fails the whole parse.
pub fn parse_table(document: &[u8]) -> Result<Table> {
    if is_blank(document) {
        return Ok(Table::new());
    }

    let node: serde_yaml::Value = serde_yaml::from_slice(document).map_err(|e| {
        tracing::debug!("Failed to parse table document: {}", e);
        DbError::from(e)
    })?;

    let mapping = match node {
        serde_yaml::Value::Null => return Ok(Table::new()),
        serde_yaml::Value::Mapping(mapping) => mapping,
        other => {
            tracing::debug!("Table document is {}, not a mapping", kind_of(&other));
            return Err(DbError::Serialization(format!(
                "expected a mapping of rows, found {}",
                kind_of(&other)
            )));
        }
    };

    let mut table = Table::new();
    for (key, body) in mapping {
        let row_id = key_to_string(key)
            .ok_or_else(|| DbError::Serialization("row ids must be scalars".to_string()))?;
        let record = Record::from_yaml(body).map_err(|e| {
            tracing::debug!("Row '{}' is not a valid record: {}", row_id, e);
            e
        })?;
        table.insert(row_id, record);
    }
    Ok(table)
}

/// Pipe-delimited projection of a table
///
/// The header is the first row's column names; each following line is one
/// row with cells in header order. A table without rows renders as an empty
/// string. Fails with [`DbError::InvalidTableData`] when a row's columns
/// differ from the header's.
pub fn render_table(table: &Table) -> Result<String> {
    let header: Vec<&str> = match table.first_row() {
        Some(record) => record.column_names().collect(),
        None => return Ok(String::new()),
    };

    let mut output = header.join("|");

    for (row_id, record) in table.rows() {
        if record.len() != header.len() {
            tracing::debug!(
                "Row '{}' has {} columns, header has {}",
                row_id,
                record.len(),
                header.len()
            );
            return Err(DbError::InvalidTableData);
        }

        let mut cells = Vec::with_capacity(header.len());
        for column in &header {
            match record.get(column) {
                Some(value) => cells.push(value.render()),
                None => {
                    tracing::debug!("Row '{}' lacks column '{}'", row_id, column);
                    return Err(DbError::InvalidTableData);
                }
            }
        }

        output.push('\n');
        output.push_str(&cells.join("|"));
    }

    Ok(output)
}

/// Serialize one row as a standalone document fragment, ready to append
pub fn serialize_row(row_id: &str, record: &Record) -> Result<String> {
    let mut document = BTreeMap::new();
    document.insert(row_id, record);
    Ok(serde_yaml::to_string(&document)?)
}

/// `row_id_` followed by `length` random alphanumeric characters
pub fn generate_row_id(length: usize) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length.max(1))
        .map(char::from)
        .collect();
    format!("{}{}", ROW_ID_PREFIX, suffix)
}
