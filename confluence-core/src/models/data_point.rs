use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::BrowserKey;

/// One per (browser, snapshot date). Shared shape for the failure-to-ship
/// and vendor-specific output collections; identity key is
/// (browser_key, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserDataPoint {
    pub browser_key: BrowserKey,
    pub browser_name: String,
    pub date: DateTime<Utc>,
    pub value: usize,
}
