use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::BrowserKey;

/// One browser build inside its release-ordered version chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub browser_key: BrowserKey,
    /// Predecessor in the same (browser, OS-family) chain; `None` for the
    /// earliest version.
    pub prev_browser_key: Option<BrowserKey>,
    pub release_date: DateTime<Utc>,
}

impl VersionRecord {
    pub fn browser_name(&self) -> &str {
        self.browser_key.browser_name()
    }

    pub fn os_name(&self) -> &str {
        self.browser_key.os_name()
    }
}
