//! Engine configuration, loadable from TOML with serde defaults.

pub mod defaults;
mod metrics_config;
mod storage_config;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use metrics_config::MetricsConfig;
pub use storage_config::StorageConfig;

use crate::errors::{ConfigError, ConfluenceResult};

/// Top-level configuration for a metrics run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Path to the browser release-history JSON reference table.
    pub history_path: PathBuf,
    pub storage: StorageConfig,
    pub metrics: MetricsConfig,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(defaults::DEFAULT_HISTORY_PATH),
            storage: StorageConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl ConfluenceConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn from_toml_file(path: &Path) -> ConfluenceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.broadly_shipped_threshold == 0 {
            return Err(ConfigError::Invalid {
                reason: "broadly_shipped_threshold must be at least 1".to_string(),
            });
        }
        if self.metrics.removal_window_years < 1 {
            return Err(ConfigError::Invalid {
                reason: "removal_window_years must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
