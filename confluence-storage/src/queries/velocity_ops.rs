//! Raw SQL operations for the api_velocity table.

use rusqlite::{params, Connection};

use confluence_core::errors::ConfluenceResult;
use confluence_core::keys::BrowserKey;
use confluence_core::models::ApiVelocityMetric;

use super::parse_timestamp;
use crate::to_storage_err;

pub fn put_velocity(conn: &Connection, metric: &ApiVelocityMetric) -> ConfluenceResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO api_velocity
         (browser_key, prev_browser_key, release_date, total_apis, new_apis, removed_apis)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            metric.browser_key.as_str(),
            metric.prev_browser_key.as_ref().map(|k| k.as_str()),
            metric.release_date.to_rfc3339(),
            metric.total_apis as i64,
            metric.new_apis as i64,
            metric.removed_apis as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All velocity metrics, ordered by browser key.
pub fn get_velocity_metrics(conn: &Connection) -> ConfluenceResult<Vec<ApiVelocityMetric>> {
    let mut stmt = conn
        .prepare(
            "SELECT browser_key, prev_browser_key, release_date,
                    total_apis, new_apis, removed_apis
             FROM api_velocity ORDER BY browser_key ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut metrics = Vec::new();
    for row in rows {
        let (key, prev, date, total, new, removed) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        metrics.push(ApiVelocityMetric {
            browser_key: key.parse::<BrowserKey>()?,
            prev_browser_key: prev.map(|p| p.parse::<BrowserKey>()).transpose()?,
            release_date: parse_timestamp(&date)?,
            total_apis: total as usize,
            new_apis: new as usize,
            removed_apis: removed as usize,
        });
    }
    Ok(metrics)
}
