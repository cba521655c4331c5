//! Version sequencer: groups browser builds into per-(browser, OS-family)
//! ordered version chains.

use std::collections::BTreeMap;

use tracing::debug;

use confluence_core::errors::ConfluenceResult;
use confluence_core::history::BrowserHistory;
use confluence_core::keys::BrowserKey;
use confluence_core::models::VersionRecord;

/// The release-ordered version chain of one (browserName, osName) family.
///
/// Grouping deliberately ignores the OS *version*: browsers whose version is
/// coupled to the OS release (Safari) are only comparable within the same OS
/// family across OS versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChain {
    pub browser_name: String,
    pub os_name: String,
    pub records: Vec<VersionRecord>,
}

impl VersionChain {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Group browser keys into version chains and resolve every release date.
///
/// Within each family, keys are sorted lexicographically by the rendered key
/// string, which is ascending version order for this dataset's naming
/// convention. A resolver miss fails the whole run: every calculator
/// downstream depends on release dates.
pub fn build_chains(
    browser_keys: &[BrowserKey],
    history: &BrowserHistory,
) -> ConfluenceResult<Vec<VersionChain>> {
    // BTreeMap on the (name, os) tuple keeps chain order deterministic.
    let mut families: BTreeMap<(String, String), Vec<BrowserKey>> = BTreeMap::new();
    for key in browser_keys {
        families
            .entry((key.browser_name().to_string(), key.os_name().to_string()))
            .or_default()
            .push(key.clone());
    }

    let mut chains = Vec::with_capacity(families.len());
    for ((browser_name, os_name), mut keys) in families {
        keys.sort_unstable();

        let mut records = Vec::with_capacity(keys.len());
        let mut prev: Option<BrowserKey> = None;
        for key in keys {
            let release_date = history.release_date(&key)?;
            records.push(VersionRecord {
                browser_key: key.clone(),
                prev_browser_key: prev.take(),
                release_date,
            });
            prev = Some(key);
        }
        debug!(
            browser = %browser_name,
            os = %os_name,
            versions = records.len(),
            "sequenced version chain"
        );
        chains.push(VersionChain {
            browser_name,
            os_name,
            records,
        });
    }
    Ok(chains)
}
