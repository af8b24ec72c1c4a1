//! # YamlDB
//!
//! A minimal networked tabular store:
//! - Databases are directories, tables are YAML documents
//! - Line-oriented TCP protocol with length-framed responses
//! - Append-only row writes with a column check against the existing table
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │              (worker pool, one line per command)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Engine                             │
//! │           (validate verb/arity, dispatch, respond)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Database   │          │    Table    │
//!   │   Store     │          │    Store    │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                          ┌────────┴────────┐
//!                          ▼                 ▼
//!                   ┌─────────────┐   ┌─────────────┐
//!                   │  Document   │   │   Content   │
//!                   │   Model     │   │    Codec    │
//!                   └─────────────┘   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod document;
pub mod storage;
pub mod network;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DbError, Result};
pub use config::Config;
pub use engine::Engine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of YamlDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
