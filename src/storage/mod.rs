//! Storage Module
//!
//! Filesystem-backed databases and tables.
//!
//! ## Layout
//! ```text
//! {data_dir}/
//! ├── SHOP.db/            database = directory
//! │   ├── ITEMS.tbl       table = one YAML document
//! │   └── ORDERS.tbl
//! └── HR.db/
//! ```
//!
//! ## Concurrency
//! - `namespace`: RwLock shared by both stores. Table operations hold it
//!   shared; database create/delete hold it exclusively, so a database
//!   cannot be removed between a table's existence check and its write.
//! - Per-table mutex (see [`TableStore`]) serializes the read-check-append
//!   sequence of writes to the same table.

mod names;
mod database;
mod table;

pub use names::{DatabaseName, QualifiedName, DB_SUFFIX, NAMESPACE_SEPARATOR, TABLE_SUFFIX};
pub use database::DatabaseStore;
pub use table::{TableStore, EMPTY_TABLE_DOCUMENT, INVALID_DATA_SENTINEL, NO_DATA_SENTINEL};

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

/// Paths and the namespace lock shared by the database and table stores
#[derive(Debug)]
pub struct Layout {
    root: PathBuf,
    namespace: RwLock<()>,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            namespace: RwLock::new(()),
        }
    }

    /// Storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database_dir(&self, database: &DatabaseName) -> PathBuf {
        self.root.join(database.dir_name())
    }

    pub fn table_file(&self, name: &QualifiedName) -> PathBuf {
        self.database_dir(name.database()).join(name.file_name())
    }

    pub(crate) fn namespace(&self) -> &RwLock<()> {
        &self.namespace
    }
}
