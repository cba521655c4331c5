//! Raw SQL operations, one module per concern.

pub mod data_point_ops;
pub mod fact_ops;
pub mod removal_ops;
pub mod velocity_ops;

use chrono::{DateTime, Utc};

use confluence_core::errors::ConfluenceResult;

use crate::to_storage_err;

/// Comma-separated `?` placeholders for a dynamic IN list.
pub(crate) fn placeholders(count: usize) -> String {
    let mut out = String::with_capacity(count * 2);
    for i in 0..count {
        if i > 0 {
            out.push(',');
        }
        out.push('?');
    }
    out
}

/// Parse an RFC 3339 timestamp column.
pub(crate) fn parse_timestamp(text: &str) -> ConfluenceResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {text:?}: {e}")))
}
