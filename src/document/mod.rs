//! Document Module
//!
//! In-memory form of table documents.
//!
//! ## Document Shape
//! A table file is one YAML mapping from row id to a flat mapping of
//! column → scalar:
//! ```text
//! row_id_QmX2aP:
//!   name: pen
//!   price: 5
//! row_id_r8TTc0:
//!   name: ink
//!   price: 2.5
//! ```
//!
//! Mappings keep document order, so "the first row" is the first row in the
//! file and the header of a rendered table follows that row's column order.
//! Parsed tables are transient: every request parses the file again.

mod record;
mod table;

pub use record::{parse_record, Record};
pub use table::{
    generate_row_id, parse_table, render_table, serialize_row, Table, ROW_ID_PREFIX,
};

use serde::{Serialize, Serializer};

/// Cell text for sequences, mappings and tagged values
pub const UNSUPPORTED_PLACEHOLDER: &str = "arrays-not-supported-currently";

/// A single column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    Float(f64),
    String(String),
    /// Nested or array value, kept as-is so it can be written back
    Unsupported(serde_yaml::Value),
}

impl Value {
    /// Cell text used by [`render_table`]
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::UInt(u) => u.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Unsupported(_) => UNSUPPORTED_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Value::Unsupported(_))
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => Value::String(s),
            other => Value::Unsupported(other),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::UInt(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Unsupported(v) => v.serialize(serializer),
        }
    }
}

/// Render a YAML mapping key as a column name or row id
///
/// Only scalar keys are accepted.
pub(crate) fn key_to_string(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
