//! The single write connection. All mutations go through here; WAL keeps
//! readers unblocked while a write is in flight.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use confluence_core::errors::{ConfluenceError, ConfluenceResult, StorageError};

use super::pragmas::apply_write_pragmas;
use crate::to_storage_err;

/// Exclusive owner of write access to the database.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> ConfluenceResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_write_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> ConfluenceResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with the write connection. Async so that callers in
    /// query chains sequence writes with `.await` like any other step.
    pub async fn with_conn<F, T>(&self, f: F) -> ConfluenceResult<T>
    where
        F: FnOnce(&Connection) -> ConfluenceResult<T>,
    {
        self.with_conn_sync(f)
    }

    /// Synchronous variant for setup paths (migrations) and read routing in
    /// in-memory mode.
    pub fn with_conn_sync<F, T>(&self, f: F) -> ConfluenceResult<T>
    where
        F: FnOnce(&Connection) -> ConfluenceResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            ConfluenceError::Storage(StorageError::LockPoisoned {
                message: e.to_string(),
            })
        })?;
        f(&guard)
    }
}
