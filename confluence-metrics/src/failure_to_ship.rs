//! Failure-to-ship calculator: how many broadly-shipped APIs a browser
//! build is missing at each synchronization point.

use rustc_hash::FxHashMap;
use tracing::debug;

use confluence_core::errors::ConfluenceResult;
use confluence_core::keys::BrowserKey;
use confluence_core::models::BrowserDataPoint;
use confluence_core::traits::{FactStore, MetricsSink};

use crate::synchronizer::Snapshot;

/// For every snapshot, an API is broadly shipped when at least `threshold`
/// of the snapshot's active browsers expose it. Each active browser's value
/// is the number of broadly-shipped APIs it does not expose.
pub async fn compute<S>(
    store: &S,
    snapshots: &[Snapshot],
    threshold: usize,
) -> ConfluenceResult<()>
where
    S: FactStore + MetricsSink,
{
    for snapshot in snapshots {
        let grouped = store.api_keys_grouped(&snapshot.active).await?;

        let mut shipped_count: FxHashMap<&BrowserKey, usize> =
            snapshot.active.iter().map(|key| (key, 0)).collect();
        let mut broadly_shipped = 0;
        for owners in grouped.values() {
            if owners.len() >= threshold {
                broadly_shipped += 1;
                for owner in owners {
                    if let Some(count) = shipped_count.get_mut(owner) {
                        *count += 1;
                    }
                }
            }
        }

        for browser_key in &snapshot.active {
            let shipped = shipped_count.get(browser_key).copied().unwrap_or(0);
            store
                .put_failure_to_ship(&BrowserDataPoint {
                    browser_key: browser_key.clone(),
                    browser_name: browser_key.browser_name().to_string(),
                    date: snapshot.date,
                    value: broadly_shipped - shipped,
                })
                .await?;
        }
        debug!(
            date = %snapshot.date,
            broadly_shipped,
            browsers = snapshot.active.len(),
            "computed failure-to-ship data points"
        );
    }
    Ok(())
}
