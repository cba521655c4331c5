//! Schema migrations, applied in order and tracked in `schema_version`.

mod v001_fact_tables;
mod v002_metric_tables;

use rusqlite::Connection;
use tracing::debug;

use confluence_core::errors::{ConfluenceError, ConfluenceResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> ConfluenceResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_fact_tables::migrate),
    (2, v002_metric_tables::migrate),
];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> ConfluenceResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            ConfluenceError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [*version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        debug!(version, "applied migration");
    }
    Ok(())
}
