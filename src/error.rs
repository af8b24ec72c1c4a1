//! Error types for YamlDB
//!
//! Provides a unified error type for all operations.
//!
//! Two families live here:
//! - domain errors, whose `Display` text is sent to the client verbatim
//! - internal errors, which keep their full diagnostic for the local log but
//!   are collapsed to [`ENGINE_ERROR`] on the wire

use thiserror::Error;

/// Result type alias using DbError
pub type Result<T> = std::result::Result<T, DbError>;

/// Generic text sent to clients in place of any internal error
pub const ENGINE_ERROR: &str = "DB ENGINE ERROR";

/// Unified error type for YamlDB operations
#[derive(Debug, Error)]
pub enum DbError {
    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("NO COMMAND PROVIDED")]
    EmptyCommand,

    #[error("INVALID COMMAND: {0}")]
    InvalidCommand(String),

    #[error("INVALID COMMAND")]
    UnknownCommand,

    #[error("INVALID NUMBER OF ARGUMENTS")]
    InvalidArgumentCount,

    #[error("COMMAND '{0}' IS NOT IMPLEMENTED")]
    NotImplemented(String),

    // -------------------------------------------------------------------------
    // Database Errors
    // -------------------------------------------------------------------------
    #[error("INVALID DB-NAME")]
    InvalidDbName,

    #[error("DB ALREADY EXISTS")]
    DbAlreadyExists,

    #[error("DB DOES NOT EXISTS")]
    DbNotFound,

    #[error("INVALID DB-NAME, DATABASE DOES NOT EXISTS")]
    ListDbNotFound,

    #[error("CANNOT DELETE DATABASE, IT HAS TABLES")]
    DbHasTables,

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("INVALID TABLE-NAME, VALID TABLE-NAME SHOULD NOT HAVE ':'. PLEASE REENTER TABLE NAME AS <DB-NAME>:<TABLE-NAME>")]
    TooManySeparators,

    #[error("INVALID TABLE-NAME")]
    InvalidTableName,

    #[error("TABLE '{0}' ALREADY EXISTS")]
    TableAlreadyExists(String),

    #[error("TABLE DOES NOT EXISTS")]
    TableNotFound,

    #[error("INVALID TABLE DATA")]
    InvalidTableData,

    #[error("NO TABLE-DATA PROVIDED")]
    NoDataProvided,

    #[error("INVALID TABLE-DATA PROVIDED")]
    InvalidDataProvided,

    #[error("INVALID TABLE DATA IN EXISTING TABLE")]
    InvalidExistingTable,

    #[error("INVALID TABLE-DATA, COLUMNS DON'T MATCH WITH EXISTING TABLE")]
    ColumnMismatch,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// True for failures of the environment rather than of the request
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            DbError::Io(_) | DbError::Serialization(_) | DbError::Protocol(_) | DbError::Config(_)
        )
    }

    /// The text that may be shown to a client
    pub fn client_message(&self) -> String {
        if self.is_internal() {
            ENGINE_ERROR.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<serde_yaml::Error> for DbError {
    fn from(err: serde_yaml::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}
