//! Raw API facts as produced by the extraction collaborator.

use serde::{Deserialize, Serialize};

use crate::errors::FactError;
use crate::keys::{ApiKey, BrowserKey};

/// One observation: a given browser build exposes a given interface member.
///
/// Immutable once ingested. The extraction collaborator deduplicates per
/// browser build, so at most one fact exists per (browser_key, api_key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFact {
    pub browser_name: String,
    pub browser_version: String,
    pub os_name: String,
    pub os_version: String,
    pub interface_name: String,
    pub api_name: String,
}

impl ApiFact {
    /// Derived unique identifier for the browser build this fact belongs to.
    pub fn browser_key(&self) -> BrowserKey {
        BrowserKey::new(
            &self.browser_name,
            &self.browser_version,
            &self.os_name,
            &self.os_version,
        )
    }

    /// Derived identifier for the interface member this fact describes.
    pub fn api_key(&self) -> ApiKey {
        ApiKey::new(&self.interface_name, &self.api_name)
    }

    /// Reject facts with missing fields or fields that would corrupt the
    /// derived composite keys. Called at ingestion, before anything is stored.
    pub fn validate(&self) -> Result<(), FactError> {
        let required: [(&str, &str); 6] = [
            ("browser_name", &self.browser_name),
            ("browser_version", &self.browser_version),
            ("os_name", &self.os_name),
            ("os_version", &self.os_version),
            ("interface_name", &self.interface_name),
            ("api_name", &self.api_name),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(FactError::MissingField { field });
            }
        }
        // Underscores inside the first three segments would shift the
        // browser-key segment boundaries.
        for value in [&self.browser_name, &self.browser_version, &self.os_name] {
            if value.contains('_') {
                return Err(FactError::MalformedBrowserKey {
                    key: self.browser_key().to_string(),
                });
            }
        }
        if self.interface_name.contains('#') || self.api_name.contains('#') {
            return Err(FactError::MalformedApiKey {
                key: self.api_key().to_string(),
            });
        }
        Ok(())
    }
}
