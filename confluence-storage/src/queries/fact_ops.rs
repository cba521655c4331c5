//! Raw SQL operations for the api_facts table.

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection};
use rustc_hash::FxHashMap;

use confluence_core::errors::ConfluenceResult;
use confluence_core::facts::ApiFact;
use confluence_core::keys::{ApiKey, BrowserKey};

use super::{parse_timestamp, placeholders};
use crate::to_storage_err;

/// Insert facts with their resolved release dates. Duplicate
/// (browser_key, api_key) pairs are ignored; the extractor deduplicates
/// upstream, so re-ingestion stays idempotent.
pub fn insert_facts(
    conn: &Connection,
    rows: &[(ApiFact, DateTime<Utc>)],
) -> ConfluenceResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut inserted = 0;
    {
        let mut stmt = tx
            .prepare(
                "INSERT OR IGNORE INTO api_facts
                 (browser_key, api_key, browser_name, browser_version,
                  os_name, os_version, interface_name, api_name, release_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for (fact, release_date) in rows {
            inserted += stmt
                .execute(params![
                    fact.browser_key().as_str(),
                    fact.api_key().as_str(),
                    fact.browser_name,
                    fact.browser_version,
                    fact.os_name,
                    fact.os_version,
                    fact.interface_name,
                    fact.api_name,
                    release_date.to_rfc3339(),
                ])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(inserted)
}

/// Distinct browser keys, ascending.
pub fn distinct_browser_keys(conn: &Connection) -> ConfluenceResult<Vec<BrowserKey>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT browser_key FROM api_facts ORDER BY browser_key ASC")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut keys = Vec::new();
    for row in rows {
        let text = row.map_err(|e| to_storage_err(e.to_string()))?;
        keys.push(text.parse::<BrowserKey>()?);
    }
    Ok(keys)
}

/// Sorted API-key sequence for one browser build.
pub fn api_keys_for(conn: &Connection, browser_key: &BrowserKey) -> ConfluenceResult<Vec<ApiKey>> {
    let mut stmt = conn
        .prepare("SELECT api_key FROM api_facts WHERE browser_key = ?1 ORDER BY api_key ASC")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([browser_key.as_str()], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut keys = Vec::new();
    for row in rows {
        let text = row.map_err(|e| to_storage_err(e.to_string()))?;
        keys.push(text.parse::<ApiKey>()?);
    }
    Ok(keys)
}

/// Group facts by API key across only the given browser builds.
pub fn api_keys_grouped(
    conn: &Connection,
    browser_keys: &[BrowserKey],
) -> ConfluenceResult<FxHashMap<ApiKey, Vec<BrowserKey>>> {
    if browser_keys.is_empty() {
        return Ok(FxHashMap::default());
    }
    let sql = format!(
        "SELECT api_key, browser_key FROM api_facts
         WHERE browser_key IN ({})
         ORDER BY api_key ASC, browser_key ASC",
        placeholders(browser_keys.len())
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params_from_iter(browser_keys.iter().map(|k| k.as_str())),
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut grouped: FxHashMap<ApiKey, Vec<BrowserKey>> = FxHashMap::default();
    for row in rows {
        let (api_text, browser_text) = row.map_err(|e| to_storage_err(e.to_string()))?;
        grouped
            .entry(api_text.parse::<ApiKey>()?)
            .or_default()
            .push(browser_text.parse::<BrowserKey>()?);
    }
    Ok(grouped)
}

/// Distinct API keys among `candidates` exposed by any of the given builds.
pub fn api_keys_present(
    conn: &Connection,
    browser_keys: &[BrowserKey],
    candidates: &[ApiKey],
) -> ConfluenceResult<Vec<ApiKey>> {
    if browser_keys.is_empty() || candidates.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT DISTINCT api_key FROM api_facts
         WHERE browser_key IN ({}) AND api_key IN ({})
         ORDER BY api_key ASC",
        placeholders(browser_keys.len()),
        placeholders(candidates.len())
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let params = browser_keys
        .iter()
        .map(|k| k.as_str())
        .chain(candidates.iter().map(|k| k.as_str()));
    let rows = stmt
        .query_map(params_from_iter(params), |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut keys = Vec::new();
    for row in rows {
        let text = row.map_err(|e| to_storage_err(e.to_string()))?;
        keys.push(text.parse::<ApiKey>()?);
    }
    Ok(keys)
}

/// Builds of other browser names released strictly inside (after, before).
/// RFC 3339 strings with a fixed UTC offset compare chronologically, so the
/// strict bounds translate directly to `>` / `<` on the text column.
pub fn browser_keys_released_within(
    conn: &Connection,
    exclude_browser_name: &str,
    after: DateTime<Utc>,
    before: DateTime<Utc>,
) -> ConfluenceResult<Vec<(BrowserKey, DateTime<Utc>)>> {
    let mut stmt = conn
        .prepare(
            "SELECT DISTINCT browser_key, release_date FROM api_facts
             WHERE browser_name != ?1
               AND release_date > ?2
               AND release_date < ?3
             ORDER BY release_date ASC, browser_key ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![exclude_browser_name, after.to_rfc3339(), before.to_rfc3339()],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut releases = Vec::new();
    for row in rows {
        let (key_text, date_text) = row.map_err(|e| to_storage_err(e.to_string()))?;
        releases.push((key_text.parse::<BrowserKey>()?, parse_timestamp(&date_text)?));
    }
    Ok(releases)
}

/// Total number of stored facts.
pub fn count_facts(conn: &Connection) -> ConfluenceResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM api_facts", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}
