//! Raw SQL operations for the failure_to_ship and vendor_specific tables.
//! Both collections share the BrowserDataPoint shape.

use rusqlite::{params, Connection};

use confluence_core::errors::ConfluenceResult;
use confluence_core::keys::BrowserKey;
use confluence_core::models::BrowserDataPoint;

use super::parse_timestamp;
use crate::to_storage_err;

/// The two data-point collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPointKind {
    FailureToShip,
    VendorSpecific,
}

impl DataPointKind {
    fn table(self) -> &'static str {
        match self {
            DataPointKind::FailureToShip => "failure_to_ship",
            DataPointKind::VendorSpecific => "vendor_specific",
        }
    }
}

pub fn put_data_point(
    conn: &Connection,
    kind: DataPointKind,
    point: &BrowserDataPoint,
) -> ConfluenceResult<()> {
    let sql = format!(
        "INSERT OR REPLACE INTO {}
         (browser_key, browser_name, date, value)
         VALUES (?1, ?2, ?3, ?4)",
        kind.table()
    );
    conn.execute(
        &sql,
        params![
            point.browser_key.as_str(),
            point.browser_name,
            point.date.to_rfc3339(),
            point.value as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All points of one collection, ordered by date then browser key.
pub fn get_data_points(
    conn: &Connection,
    kind: DataPointKind,
) -> ConfluenceResult<Vec<BrowserDataPoint>> {
    let sql = format!(
        "SELECT browser_key, browser_name, date, value
         FROM {} ORDER BY date ASC, browser_key ASC",
        kind.table()
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut points = Vec::new();
    for row in rows {
        let (key, name, date, value) = row.map_err(|e| to_storage_err(e.to_string()))?;
        points.push(BrowserDataPoint {
            browser_key: key.parse::<BrowserKey>()?,
            browser_name: name,
            date: parse_timestamp(&date)?,
            value: value as usize,
        });
    }
    Ok(points)
}
