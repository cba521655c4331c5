use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::BrowserKey;

/// Per-version aggressive-removal score: how many APIs this release dropped
/// that the rest of the ecosystem kept shipping within the lookahead window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedApiMetric {
    pub browser_key: BrowserKey,
    pub prev_browser_key: Option<BrowserKey>,
    pub release_date: DateTime<Utc>,
    /// Latest release of each other browser inside the lookahead window.
    pub compared_browser_keys: Vec<BrowserKey>,
    pub aggressive_removal: usize,
}
