//! Raw SQL operations for the aggressive_removal table. The compared
//! browser keys are stored as a JSON array.

use rusqlite::{params, Connection};

use confluence_core::errors::ConfluenceResult;
use confluence_core::keys::BrowserKey;
use confluence_core::models::RemovedApiMetric;

use super::parse_timestamp;
use crate::to_storage_err;

pub fn put_removal(conn: &Connection, metric: &RemovedApiMetric) -> ConfluenceResult<()> {
    let compared = serde_json::to_string(&metric.compared_browser_keys)
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT OR REPLACE INTO aggressive_removal
         (browser_key, prev_browser_key, release_date, compared_browser_keys, aggressive_removal)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            metric.browser_key.as_str(),
            metric.prev_browser_key.as_ref().map(|k| k.as_str()),
            metric.release_date.to_rfc3339(),
            compared,
            metric.aggressive_removal as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All removal metrics, ordered by browser key.
pub fn get_removal_metrics(conn: &Connection) -> ConfluenceResult<Vec<RemovedApiMetric>> {
    let mut stmt = conn
        .prepare(
            "SELECT browser_key, prev_browser_key, release_date,
                    compared_browser_keys, aggressive_removal
             FROM aggressive_removal ORDER BY browser_key ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut metrics = Vec::new();
    for row in rows {
        let (key, prev, date, compared, removal) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let compared_browser_keys: Vec<BrowserKey> =
            serde_json::from_str(&compared).map_err(|e| to_storage_err(e.to_string()))?;
        metrics.push(RemovedApiMetric {
            browser_key: key.parse::<BrowserKey>()?,
            prev_browser_key: prev.map(|p| p.parse::<BrowserKey>()).transpose()?,
            release_date: parse_timestamp(&date)?,
            compared_browser_keys,
            aggressive_removal: removal as usize,
        });
    }
    Ok(metrics)
}
