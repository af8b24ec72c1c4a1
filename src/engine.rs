//! Engine Module
//!
//! The command engine: validates command text, dispatches to the database
//! and table stores, and turns results into response text.
//!
//! ## Responsibilities
//! - Validate verb and arity ([`Engine::make_command`])
//! - Route parsed commands to the stores ([`Engine::execute`])
//! - Collapse internal failures to a generic message ([`Engine::handle`])

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{Command, Response, Verb};
use crate::storage::{DatabaseStore, Layout, TableStore};
use crate::DbError;

/// The command engine
///
/// ## Concurrency Model
/// The engine holds no per-request state: each request's parsed
/// [`Command`] is passed explicitly, so one `Arc<Engine>` serves every
/// connection. Table writes are serialized per table inside
/// [`TableStore`]; database create/delete exclude all table operations.
pub struct Engine {
    /// Engine configuration
    config: Config,

    databases: DatabaseStore,

    tables: TableStore,
}

impl Engine {
    /// Open an engine over the configured storage root
    ///
    /// The root itself is created lazily by the first `CREATE-DB`.
    pub fn open(config: Config) -> Result<Self> {
        if config.data_dir.exists() && !config.data_dir.is_dir() {
            return Err(DbError::Config(format!(
                "storage root {} is not a directory",
                config.data_dir.display()
            )));
        }

        let layout = Arc::new(Layout::new(config.data_dir.clone()));

        Ok(Self {
            databases: DatabaseStore::new(Arc::clone(&layout)),
            tables: TableStore::new(layout),
            config,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified storage root
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.data_dir = path.to_path_buf();
        Self::open(config)
    }

    /// Validate raw command text
    ///
    /// Unknown verb → `INVALID COMMAND: <verb>`; wrong argument count →
    /// `INVALID NUMBER OF ARGUMENTS`.
    pub fn make_command(&self, text: &str) -> Result<Command> {
        Command::parse(text)
    }

    /// Execute a parsed command
    ///
    /// Routes commands to the appropriate store
    pub fn execute(&self, command: &Command) -> Result<String> {
        let arg = |index: usize| command.arg(index).ok_or(DbError::InvalidArgumentCount);

        match command.verb() {
            Verb::CreateDb => self.databases.create(arg(0)?),
            Verb::ListDbs => self.databases.list(),
            Verb::DeleteDb => self.databases.delete(arg(0)?),
            Verb::UseDb => self.databases.use_db(arg(0)?),
            Verb::CreateTable => self.tables.create(arg(0)?),
            Verb::DeleteTable => self.tables.delete(arg(0)?),
            Verb::ListTables => self.tables.list(arg(0)?),
            Verb::ReadTable => self.tables.read(arg(0)?),
            Verb::WriteTable => self.tables.write(arg(0)?, arg(1)?),
            verb @ (Verb::Filter | Verb::Sort) => {
                Err(DbError::NotImplemented(verb.name().to_string()))
            }
        }
    }

    /// Validate, execute and render one request line
    ///
    /// Never fails: domain errors become their message, internal errors are
    /// logged in full and reported as `DB ENGINE ERROR`.
    pub fn handle(&self, text: &str) -> Response {
        let result = self
            .make_command(text)
            .and_then(|command| {
                tracing::debug!("Executing {}", command.verb());
                self.execute(&command)
            });

        match result {
            Ok(output) => Response::ok(output),
            Err(e) => {
                if e.is_internal() {
                    tracing::error!("Command {:?} failed: {}", summarize(text), e);
                } else {
                    tracing::debug!("Command {:?} rejected: {}", summarize(text), e);
                }
                Response::from(&e)
            }
        }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the storage root path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn databases(&self) -> &DatabaseStore {
        &self.databases
    }

    pub fn tables(&self) -> &TableStore {
        &self.tables
    }
}

/// Verb and first argument only; payloads can be large
fn summarize(text: &str) -> String {
    text.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}
