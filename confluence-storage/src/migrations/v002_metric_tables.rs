//! v002: the four output collections, one table per calculator.

use rusqlite::Connection;

use confluence_core::errors::ConfluenceResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ConfluenceResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS api_velocity (
            browser_key      TEXT PRIMARY KEY,
            prev_browser_key TEXT,
            release_date     TEXT NOT NULL,
            total_apis       INTEGER NOT NULL,
            new_apis         INTEGER NOT NULL,
            removed_apis     INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS failure_to_ship (
            browser_key  TEXT NOT NULL,
            browser_name TEXT NOT NULL,
            date         TEXT NOT NULL,
            value        INTEGER NOT NULL,
            PRIMARY KEY (browser_key, date)
        );

        CREATE TABLE IF NOT EXISTS vendor_specific (
            browser_key  TEXT NOT NULL,
            browser_name TEXT NOT NULL,
            date         TEXT NOT NULL,
            value        INTEGER NOT NULL,
            PRIMARY KEY (browser_key, date)
        );

        CREATE TABLE IF NOT EXISTS aggressive_removal (
            browser_key           TEXT PRIMARY KEY,
            prev_browser_key      TEXT,
            release_date          TEXT NOT NULL,
            compared_browser_keys TEXT NOT NULL,
            aggressive_removal    INTEGER NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
