//! Record (row) model

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{DbError, Result};
use super::{key_to_string, Value};

/// One row: column name → value, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a column value
    pub fn insert(&mut self, column: impl Into<String>, value: Value) -> Option<Value> {
        self.columns.insert(column.into(), value)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Column names in document order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Build a record from a parsed YAML node
    ///
    /// `null` (an empty document) yields an empty record; anything other
    /// than a mapping with scalar keys is rejected.
    pub(crate) fn from_yaml(node: serde_yaml::Value) -> Result<Self> {
        let mapping = match node {
            serde_yaml::Value::Null => return Ok(Self::new()),
            serde_yaml::Value::Mapping(mapping) => mapping,
            other => {
                return Err(DbError::Serialization(format!(
                    "expected a mapping of columns, found {}",
                    kind_of(&other)
                )))
            }
        };

        let mut record = Self::new();
        for (key, value) in mapping {
            let column = key_to_string(key).ok_or_else(|| {
                DbError::Serialization("column names must be scalars".to_string())
            })?;
            record.insert(column, Value::from(value));
        }
        Ok(record)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in &self.columns {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Parse a single flat mapping (column → value)
///
/// Used to validate a row payload before it is added to a table.
pub fn parse_record(document: &[u8]) -> Result<Record> {
    if is_blank(document) {
        return Ok(Record::new());
    }

    let node: serde_yaml::Value = serde_yaml::from_slice(document).map_err(|e| {
        tracing::debug!("Failed to parse record document: {}", e);
        DbError::from(e)
    })?;

    Record::from_yaml(node).map_err(|e| {
        tracing::debug!("Rejected record document: {}", e);
        e
    })
}

/// A document with no content parses as an empty mapping
pub(crate) fn is_blank(document: &[u8]) -> bool {
    document.iter().all(u8::is_ascii_whitespace)
}

pub(crate) fn kind_of(node: &serde_yaml::Value) -> &'static str {
    match node {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
