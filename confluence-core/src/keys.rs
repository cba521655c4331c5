//! Composite identifiers: `BrowserKey` for one browser build, `ApiKey` for
//! one interface member.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FactError;

/// Separator between the interface name and the member name in an `ApiKey`.
const API_KEY_SEPARATOR: char = '#';

/// Separator between the four segments of a `BrowserKey`.
const BROWSER_KEY_SEPARATOR: char = '_';

/// Stable identifier for one concrete browser build:
/// `browserName_browserVersion_osName_osVersion`.
///
/// Stored in rendered form so that `Ord` is lexicographic on the key string,
/// which is ascending version order for this dataset's naming convention.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrowserKey(String);

impl BrowserKey {
    /// Build a key from its four segments.
    pub fn new(
        browser_name: &str,
        browser_version: &str,
        os_name: &str,
        os_version: &str,
    ) -> Self {
        Self(format!(
            "{browser_name}{sep}{browser_version}{sep}{os_name}{sep}{os_version}",
            sep = BROWSER_KEY_SEPARATOR
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn browser_name(&self) -> &str {
        self.segment(0)
    }

    pub fn browser_version(&self) -> &str {
        self.segment(1)
    }

    pub fn os_name(&self) -> &str {
        self.segment(2)
    }

    pub fn os_version(&self) -> &str {
        self.segment(3)
    }

    fn segment(&self, index: usize) -> &str {
        // Construction and FromStr both guarantee four segments.
        self.0
            .splitn(4, BROWSER_KEY_SEPARATOR)
            .nth(index)
            .unwrap_or("")
    }
}

impl fmt::Display for BrowserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BrowserKey {
    type Err = FactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.splitn(4, BROWSER_KEY_SEPARATOR).collect();
        if segments.len() != 4 || segments.iter().any(|seg| seg.is_empty()) {
            return Err(FactError::MalformedBrowserKey { key: s.to_string() });
        }
        Ok(Self(s.to_string()))
    }
}

/// Stable identifier for one member of one interface: `interfaceName#apiName`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(interface_name: &str, api_name: &str) -> Self {
        Self(format!("{interface_name}{API_KEY_SEPARATOR}{api_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn interface_name(&self) -> &str {
        self.0
            .split_once(API_KEY_SEPARATOR)
            .map(|(iface, _)| iface)
            .unwrap_or(&self.0)
    }

    pub fn api_name(&self) -> &str {
        self.0
            .split_once(API_KEY_SEPARATOR)
            .map(|(_, api)| api)
            .unwrap_or("")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiKey {
    type Err = FactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(API_KEY_SEPARATOR) {
            Some((iface, api)) if !iface.is_empty() && !api.is_empty() => {
                Ok(Self(s.to_string()))
            }
            _ => Err(FactError::MalformedApiKey { key: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_key_round_trips() {
        let key = BrowserKey::new("Chrome", "55.0.2883.87", "Windows", "10.0");
        assert_eq!(key.as_str(), "Chrome_55.0.2883.87_Windows_10.0");
        assert_eq!(key.browser_name(), "Chrome");
        assert_eq!(key.browser_version(), "55.0.2883.87");
        assert_eq!(key.os_name(), "Windows");
        assert_eq!(key.os_version(), "10.0");

        let parsed: BrowserKey = key.as_str().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn browser_key_rejects_missing_segments() {
        assert!("Chrome_55_Windows".parse::<BrowserKey>().is_err());
        assert!("Chrome__Windows_10".parse::<BrowserKey>().is_err());
        assert!("".parse::<BrowserKey>().is_err());
    }

    #[test]
    fn browser_key_orders_lexicographically() {
        let older = BrowserKey::new("Chrome", "54.0", "Windows", "10.0");
        let newer = BrowserKey::new("Chrome", "55.0", "Windows", "10.0");
        assert!(older < newer);
    }

    #[test]
    fn api_key_round_trips() {
        let key = ApiKey::new("Audio", "play");
        assert_eq!(key.as_str(), "Audio#play");
        assert_eq!(key.interface_name(), "Audio");
        assert_eq!(key.api_name(), "play");

        let parsed: ApiKey = "Audio#play".parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn api_key_rejects_missing_separator() {
        assert!("Audioplay".parse::<ApiKey>().is_err());
        assert!("#play".parse::<ApiKey>().is_err());
        assert!("Audio#".parse::<ApiKey>().is_err());
    }
}
