//! SQLite pragma configuration for writer and readers.

use rusqlite::Connection;

use confluence_core::errors::ConfluenceResult;

use crate::to_storage_err;

/// Pragmas for the single write connection: WAL for concurrent readers,
/// NORMAL sync (WAL makes it durable enough for a recomputable store).
pub fn apply_write_pragmas(conn: &Connection) -> ConfluenceResult<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Pragmas for read connections.
pub fn apply_read_pragmas(conn: &Connection) -> ConfluenceResult<()> {
    conn.execute_batch(
        "PRAGMA query_only = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
