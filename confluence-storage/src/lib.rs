//! # confluence-storage
//!
//! SQLite-backed fact store: connection pool (single writer + read pool),
//! schema migrations, raw SQL query modules, and the `StorageEngine` that
//! implements the core `FactStore` and `MetricsSink` contracts.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use confluence_core::errors::{ConfluenceError, StorageError};

/// Wrap a raw SQLite error message into the workspace error type.
pub fn to_storage_err(message: String) -> ConfluenceError {
    ConfluenceError::Storage(StorageError::Sqlite { message })
}
