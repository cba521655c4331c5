//! Release-date resolver backed by a JSON reference table of the form
//! `{browserName: {majorVersion: releaseDate, ...}, ...}`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rustc_hash::FxHashMap;

use crate::errors::HistoryError;
use crate::keys::BrowserKey;

/// Authoritative release dates per browser, keyed by major version.
///
/// A browser key's version is matched by textual prefix against the recorded
/// major-version entries, because the reference table only stores major
/// versions while facts carry full version strings.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    /// Per browser: (major version, release date), longest majors first so
    /// that prefix matching picks the most specific entry.
    releases: FxHashMap<String, Vec<(String, DateTime<Utc>)>>,
}

impl BrowserHistory {
    /// Load the reference table from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, HistoryError> {
        let content = std::fs::read_to_string(path).map_err(|e| HistoryError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&content).map_err(|e| match e {
            HistoryError::Unreadable { reason, .. } => HistoryError::Unreadable {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse the reference table from a JSON string.
    ///
    /// Dates may be RFC 3339 timestamps or plain `YYYY-MM-DD` dates, which
    /// are taken as midnight UTC.
    pub fn from_json_str(content: &str) -> Result<Self, HistoryError> {
        // BTreeMap keeps the parse deterministic; the per-browser entries are
        // re-sorted below anyway.
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(content)
            .map_err(|e| HistoryError::Unreadable {
                path: "<inline>".to_string(),
                reason: e.to_string(),
            })?;

        let mut releases = FxHashMap::default();
        for (browser_name, versions) in raw {
            let mut entries = Vec::with_capacity(versions.len());
            for (major, date) in versions {
                entries.push((major, parse_release_date(&date)?));
            }
            // Longest major first so "10" wins over "1" for version "10.1".
            entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
            releases.insert(browser_name, entries);
        }
        Ok(Self { releases })
    }

    /// Resolve the release date for a browser build.
    pub fn release_date(&self, key: &BrowserKey) -> Result<DateTime<Utc>, HistoryError> {
        let versions = self.releases.get(key.browser_name()).ok_or_else(|| {
            HistoryError::UnknownBrowser {
                browser_name: key.browser_name().to_string(),
            }
        })?;
        versions
            .iter()
            .find(|(major, _)| key.browser_version().starts_with(major.as_str()))
            .map(|(_, date)| *date)
            .ok_or_else(|| HistoryError::UnknownVersion {
                browser_key: key.to_string(),
            })
    }

    /// Browser names present in the reference table.
    pub fn browser_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.releases.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn parse_release_date(text: &str) -> Result<DateTime<Utc>, HistoryError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
        .map_err(|e| HistoryError::Unreadable {
            path: "<inline>".to_string(),
            reason: format!("unparseable release date {text:?}: {e}"),
        })
}
