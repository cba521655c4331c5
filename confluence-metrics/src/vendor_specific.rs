//! Vendor-specific calculator: APIs exposed by exactly one of the browsers
//! active at each synchronization point.

use rustc_hash::FxHashMap;
use tracing::debug;

use confluence_core::errors::ConfluenceResult;
use confluence_core::keys::BrowserKey;
use confluence_core::models::BrowserDataPoint;
use confluence_core::traits::{FactStore, MetricsSink};

use crate::synchronizer::Snapshot;

/// Each single-owner API is attributed to its one owner, so distinct
/// browsers never double-count the same API key.
pub async fn compute<S>(store: &S, snapshots: &[Snapshot]) -> ConfluenceResult<()>
where
    S: FactStore + MetricsSink,
{
    for snapshot in snapshots {
        let grouped = store.api_keys_grouped(&snapshot.active).await?;

        let mut exclusive_count: FxHashMap<&BrowserKey, usize> =
            snapshot.active.iter().map(|key| (key, 0)).collect();
        for owners in grouped.values() {
            if let [only_owner] = owners.as_slice() {
                if let Some(count) = exclusive_count.get_mut(only_owner) {
                    *count += 1;
                }
            }
        }

        for browser_key in &snapshot.active {
            store
                .put_vendor_specific(&BrowserDataPoint {
                    browser_key: browser_key.clone(),
                    browser_name: browser_key.browser_name().to_string(),
                    date: snapshot.date,
                    value: exclusive_count.get(browser_key).copied().unwrap_or(0),
                })
                .await?;
        }
        debug!(
            date = %snapshot.date,
            browsers = snapshot.active.len(),
            "computed vendor-specific data points"
        );
    }
    Ok(())
}
