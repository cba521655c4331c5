use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::BrowserKey;

/// Per-version API velocity: total surface plus churn against the previous
/// release. Chain-initial versions always carry zero churn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiVelocityMetric {
    pub browser_key: BrowserKey,
    pub prev_browser_key: Option<BrowserKey>,
    pub release_date: DateTime<Utc>,
    pub total_apis: usize,
    pub new_apis: usize,
    pub removed_apis: usize,
}
