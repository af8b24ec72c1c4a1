//! Database Store
//!
//! Lifecycle of database directories under the storage root.

use std::fs;
use std::io;
use std::sync::Arc;

use crate::error::{DbError, Result};
use super::names::{DatabaseName, DB_SUFFIX};
use super::Layout;

/// Creates, lists, deletes and checks databases
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    layout: Arc<Layout>,
}

impl DatabaseStore {
    pub fn new(layout: Arc<Layout>) -> Self {
        Self { layout }
    }

    /// Create the storage root if it does not exist yet
    fn initialize_root(&self) -> Result<()> {
        fs::create_dir_all(self.layout.root())?;
        Ok(())
    }

    /// Create a database directory
    pub fn create(&self, raw_name: &str) -> Result<String> {
        let name = DatabaseName::parse(raw_name)?;
        let _namespace = self.layout.namespace().write();

        self.initialize_root()?;

        let dir = self.layout.database_dir(&name);
        if dir.exists() {
            return Err(DbError::DbAlreadyExists);
        }
        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(DbError::DbAlreadyExists)
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Created database {}", name);
        Ok(format!("DB '{}' created.", name))
    }

    /// Newline-joined database names, in directory enumeration order
    pub fn list(&self) -> Result<String> {
        let _namespace = self.layout.namespace().read();

        let entries = match fs::read_dir(self.layout.root()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok("NO DATABASES EXIST".to_string())
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(name) = file_name.strip_suffix(DB_SUFFIX) {
                names.push(name.to_uppercase());
            }
        }

        if names.is_empty() {
            return Ok("NO DATABASES EXIST".to_string());
        }
        Ok(names.join("\n"))
    }

    /// Remove an empty database directory
    pub fn delete(&self, raw_name: &str) -> Result<String> {
        let name = DatabaseName::parse(raw_name)?;
        let _namespace = self.layout.namespace().write();

        let dir = self.layout.database_dir(&name);
        if !dir.is_dir() {
            return Err(DbError::DbNotFound);
        }
        if fs::read_dir(&dir)?.next().is_some() {
            return Err(DbError::DbHasTables);
        }
        fs::remove_dir(&dir)?;

        tracing::info!("Deleted database {}", name);
        Ok(format!("DB '{}' deleted.", name))
    }

    /// Confirm a database exists and return its normalized name
    ///
    /// The client keeps the "current database"; nothing is stored here.
    pub fn use_db(&self, raw_name: &str) -> Result<String> {
        let name = DatabaseName::parse(raw_name)?;
        let _namespace = self.layout.namespace().read();

        if !self.exists(&name) {
            return Err(DbError::DbNotFound);
        }
        Ok(name.as_str().to_string())
    }

    pub fn exists(&self, name: &DatabaseName) -> bool {
        self.layout.database_dir(name).is_dir()
    }
}
