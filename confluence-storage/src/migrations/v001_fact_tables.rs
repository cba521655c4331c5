//! v001: api_facts.

use rusqlite::Connection;

use confluence_core::errors::ConfluenceResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ConfluenceResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS api_facts (
            browser_key     TEXT NOT NULL,
            api_key         TEXT NOT NULL,
            browser_name    TEXT NOT NULL,
            browser_version TEXT NOT NULL,
            os_name         TEXT NOT NULL,
            os_version      TEXT NOT NULL,
            interface_name  TEXT NOT NULL,
            api_name        TEXT NOT NULL,
            release_date    TEXT NOT NULL,
            PRIMARY KEY (browser_key, api_key)
        );

        CREATE INDEX IF NOT EXISTS idx_facts_api_key ON api_facts(api_key);
        CREATE INDEX IF NOT EXISTS idx_facts_name_release
            ON api_facts(browser_name, release_date);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
