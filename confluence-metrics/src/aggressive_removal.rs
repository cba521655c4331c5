//! Aggressive-removal calculator: API removals not explained by the rest of
//! the ecosystem also dropping the API within a year.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rustc_hash::FxHashMap;
use tracing::debug;

use confluence_core::errors::{ConfluenceResult, MetricsError};
use confluence_core::keys::{ApiKey, BrowserKey};
use confluence_core::models::RemovedApiMetric;
use confluence_core::traits::{FactStore, MetricsSink};

use crate::diff::diff_sorted;
use crate::sequencer::VersionChain;

/// For each non-initial version: diff away the removed API keys, find the
/// most recent release of every *other* browser inside the lookahead window
/// (both bounds strict), and count how many removed keys those releases
/// still expose. Chain-initial versions are fixed at zero with no compared
/// browsers.
pub async fn compute<S>(
    store: &S,
    chains: &[VersionChain],
    window_years: i32,
) -> ConfluenceResult<()>
where
    S: FactStore + MetricsSink,
{
    for chain in chains {
        let mut prev_sequence: Option<Vec<ApiKey>> = None;
        for record in &chain.records {
            let sequence = store.api_keys_for(&record.browser_key).await?;
            if sequence.is_empty() {
                return Err(MetricsError::MissingSequence {
                    browser_key: record.browser_key.to_string(),
                }
                .into());
            }
            let metric = match &prev_sequence {
                None => RemovedApiMetric {
                    browser_key: record.browser_key.clone(),
                    prev_browser_key: None,
                    release_date: record.release_date,
                    compared_browser_keys: Vec::new(),
                    aggressive_removal: 0,
                },
                Some(prev) => {
                    let removed_keys = diff_sorted(prev, &sequence).removed_keys;

                    let window_end = years_after(record.release_date, window_years);
                    let released = store
                        .browser_keys_released_within(
                            &chain.browser_name,
                            record.release_date,
                            window_end,
                        )
                        .await?;
                    let compared_browser_keys = latest_per_browser(released);

                    let aggressive_removal = if compared_browser_keys.is_empty()
                        || removed_keys.is_empty()
                    {
                        0
                    } else {
                        store
                            .api_keys_present(&compared_browser_keys, &removed_keys)
                            .await?
                            .len()
                    };

                    RemovedApiMetric {
                        browser_key: record.browser_key.clone(),
                        prev_browser_key: record.prev_browser_key.clone(),
                        release_date: record.release_date,
                        compared_browser_keys,
                        aggressive_removal,
                    }
                }
            };
            store.put_removal(&metric).await?;
            prev_sequence = Some(sequence);
        }
        debug!(
            browser = %chain.browser_name,
            os = %chain.os_name,
            versions = chain.records.len(),
            "computed aggressive-removal metrics"
        );
    }
    Ok(())
}

/// Same month and day, `years` later. Feb 29 rolls over to Mar 1 when the
/// target year is not a leap year.
fn years_after(date: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    let year = date.year() + years;
    match date.with_year(year) {
        Some(shifted) => shifted,
        None => Utc
            .with_ymd_and_hms(year, 3, 1, 0, 0, 0)
            .single()
            .unwrap_or(date),
    }
}

/// Keep only the most-recently-released version per distinct browser name.
/// Input is ordered by release date ascending, so later entries win.
fn latest_per_browser(released: Vec<(BrowserKey, DateTime<Utc>)>) -> Vec<BrowserKey> {
    let mut latest: FxHashMap<String, BrowserKey> = FxHashMap::default();
    for (key, _) in released {
        latest.insert(key.browser_name().to_string(), key);
    }
    let mut keys: Vec<BrowserKey> = latest.into_values().collect();
    keys.sort_unstable();
    keys
}
