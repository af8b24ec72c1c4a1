//! Table Store
//!
//! Lifecycle of table files and the append-only write path.
//!
//! ## Write Path
//! 1. Table must exist
//! 2. Reject the client sentinels `NO-DATA` / `INVALID-DATA`
//! 3. Decode the payload and parse it as a record
//! 4. Parse the existing table
//! 5. Every new column must appear in the first existing row
//! 6. Generate a row id not already used in the table
//! 7. Append the serialized row (the seed `{}` is replaced by the first row)
//!
//! Steps 1-7 run under the table's mutex. A table's mutex lives in the
//! registry only while some operation holds or waits for it.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::document::{generate_row_id, parse_record, parse_table, render_table, serialize_row};
use crate::error::{DbError, Result};
use crate::protocol::decode_content;
use super::names::{DatabaseName, QualifiedName, TABLE_SUFFIX};
use super::Layout;

/// Payload sent by clients when the document file could not be read
pub const NO_DATA_SENTINEL: &str = "NO-DATA";

/// Payload sent by clients when the document file is not a valid record
pub const INVALID_DATA_SENTINEL: &str = "INVALID-DATA";

/// Content of a freshly created table
pub const EMPTY_TABLE_DOCUMENT: &str = "{}\n";

/// Creates, lists, deletes, reads and appends to tables
#[derive(Debug)]
pub struct TableStore {
    layout: Arc<Layout>,

    /// One mutex per qualified table name with an operation in flight
    locks: Mutex<HashMap<QualifiedName, Arc<Mutex<()>>>>,
}

impl TableStore {
    pub fn new(layout: Arc<Layout>) -> Self {
        Self {
            layout,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run `op` while holding the table's mutex
    ///
    /// The registry entry is dropped again once no other operation holds a
    /// handle to it, so names of missing or deleted tables do not accumulate.
    fn with_table_lock<T>(
        &self,
        name: &QualifiedName,
        op: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let lock = {
            let mut locks = self.locks.lock();
            Arc::clone(locks.entry(name.clone()).or_default())
        };

        let result = {
            let _table = lock.lock();
            op()
        };

        // Handles are only cloned or dropped under the registry lock: the
        // registry's own plus ours means nobody else is using this entry
        let mut locks = self.locks.lock();
        if Arc::strong_count(&lock) == 2 {
            locks.remove(name);
        }
        drop(lock);
        drop(locks);
        result
    }

    /// Number of tables with a mutex currently registered
    pub fn tracked_locks(&self) -> usize {
        self.locks.lock().len()
    }

    /// Create a table seeded with an empty document
    pub fn create(&self, raw_name: &str) -> Result<String> {
        let name = QualifiedName::parse(raw_name)?;
        let _namespace = self.layout.namespace().read();
        self.with_table_lock(&name, || self.create_locked(&name))
    }

    fn create_locked(&self, name: &QualifiedName) -> Result<String> {
        if !self.layout.database_dir(name.database()).is_dir() {
            return Err(DbError::DbNotFound);
        }

        let path = self.layout.table_file(name);
        let file = OpenOptions::new().write(true).create_new(true).open(&path);
        let mut file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(DbError::TableAlreadyExists(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(EMPTY_TABLE_DOCUMENT.as_bytes())?;

        tracing::info!("Created table {}", name);
        Ok(format!("TABLE '{}' created.", name))
    }

    /// Newline-joined table names of a database, in enumeration order
    pub fn list(&self, raw_database: &str) -> Result<String> {
        let database = DatabaseName::parse(raw_database)?;
        let _namespace = self.layout.namespace().read();

        let dir = self.layout.database_dir(&database);
        if !dir.is_dir() {
            return Err(DbError::ListDbNotFound);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(name) = file_name.strip_suffix(TABLE_SUFFIX) {
                names.push(name.to_uppercase());
            }
        }

        if names.is_empty() {
            return Ok("NO TABLES EXIST".to_string());
        }
        Ok(names.join("\n"))
    }

    /// Remove a table file
    pub fn delete(&self, raw_name: &str) -> Result<String> {
        let name = QualifiedName::parse(raw_name)?;
        let _namespace = self.layout.namespace().read();
        self.with_table_lock(&name, || {
            match fs::remove_file(self.layout.table_file(&name)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DbError::TableNotFound),
                Err(e) => Err(e.into()),
            }
        })?;

        tracing::info!("Deleted table {}", name);
        Ok(format!("TABLE '{}' deleted.", name))
    }

    /// Parse a table and return its pipe-delimited projection
    pub fn read(&self, raw_name: &str) -> Result<String> {
        let name = QualifiedName::parse(raw_name)?;
        let _namespace = self.layout.namespace().read();
        self.with_table_lock(&name, || {
            let document = self.read_document(&name)?;
            let table = parse_table(&document).map_err(|_| DbError::InvalidTableData)?;
            render_table(&table)
        })
    }

    /// Append one row to a table
    pub fn write(&self, raw_name: &str, payload: &str) -> Result<String> {
        let name = QualifiedName::parse(raw_name)?;
        let _namespace = self.layout.namespace().read();
        self.with_table_lock(&name, || self.write_locked(&name, payload))
    }

    fn write_locked(&self, name: &QualifiedName, payload: &str) -> Result<String> {
        let path = self.layout.table_file(name);
        if !path.is_file() {
            return Err(DbError::TableNotFound);
        }

        match payload {
            NO_DATA_SENTINEL => return Err(DbError::NoDataProvided),
            INVALID_DATA_SENTINEL => return Err(DbError::InvalidDataProvided),
            _ => {}
        }

        let decoded = decode_content(payload);
        let record = parse_record(&decoded).map_err(|_| DbError::InvalidDataProvided)?;

        let document = self.read_document(name)?;
        let existing = parse_table(&document).map_err(|_| DbError::InvalidExistingTable)?;

        // Only the first row defines the schema; an empty table accepts any
        if let Some(first) = existing.first_row() {
            if !record.column_names().all(|column| first.contains_column(column)) {
                tracing::debug!(
                    "Column mismatch on {}: existing {:?}, new {:?}",
                    name,
                    first.column_names().collect::<Vec<_>>(),
                    record.column_names().collect::<Vec<_>>()
                );
                return Err(DbError::ColumnMismatch);
            }
        }

        let mut row_id = generate_row_id(decoded.len());
        while existing.contains_row(&row_id) {
            row_id = generate_row_id(decoded.len());
        }

        let fragment = serialize_row(&row_id, &record)?;
        if existing.is_empty() {
            fs::write(&path, fragment.as_bytes())?;
        } else {
            let mut file = OpenOptions::new().append(true).open(&path)?;
            if !document.ends_with(b"\n") {
                file.write_all(b"\n")?;
            }
            file.write_all(fragment.as_bytes())?;
        }

        tracing::debug!("Appended row {} to {}", row_id, name);
        Ok(format!("TABLE '{}' WRITTEN.", name))
    }

    fn read_document(&self, name: &QualifiedName) -> Result<Vec<u8>> {
        match fs::read(self.layout.table_file(name)) {
            Ok(document) => Ok(document),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DbError::TableNotFound),
            Err(e) => Err(e.into()),
        }
    }
}
