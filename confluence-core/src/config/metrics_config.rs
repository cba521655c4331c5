use serde::{Deserialize, Serialize};

use super::defaults;

/// Calculator tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Minimum number of active browsers that must expose an API for it to
    /// count as broadly shipped (failure-to-ship metric).
    pub broadly_shipped_threshold: usize,
    /// Calendar-year span of the aggressive-removal lookahead window.
    pub removal_window_years: i32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            broadly_shipped_threshold: defaults::DEFAULT_BROADLY_SHIPPED_THRESHOLD,
            removal_window_years: defaults::DEFAULT_REMOVAL_WINDOW_YEARS,
        }
    }
}
