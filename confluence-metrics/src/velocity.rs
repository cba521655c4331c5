//! API velocity calculator: per-version total/new/removed API counts.

use tracing::debug;

use confluence_core::errors::{ConfluenceResult, MetricsError};
use confluence_core::keys::ApiKey;
use confluence_core::models::ApiVelocityMetric;
use confluence_core::traits::{FactStore, MetricsSink};

use crate::diff::diff_sorted;
use crate::sequencer::VersionChain;

/// Compute one velocity metric per version record.
///
/// Chain-initial versions have no predecessor to diff against and always
/// carry zero churn. Down a chain, each version's fetched sequence is reused
/// as the next version's "previous" side, so every sequence is fetched once;
/// the per-chain steps are sequenced in chain order.
pub async fn compute<S>(store: &S, chains: &[VersionChain]) -> ConfluenceResult<()>
where
    S: FactStore + MetricsSink,
{
    for chain in chains {
        let mut prev_sequence: Option<Vec<ApiKey>> = None;
        for record in &chain.records {
            let sequence = store.api_keys_for(&record.browser_key).await?;
            // Chains come from stored facts, so an empty sequence means the
            // store and the chain disagree.
            if sequence.is_empty() {
                return Err(MetricsError::MissingSequence {
                    browser_key: record.browser_key.to_string(),
                }
                .into());
            }
            let (new_apis, removed_apis) = match &prev_sequence {
                None => (0, 0),
                Some(prev) => {
                    let diff = diff_sorted(prev, &sequence);
                    (diff.new_apis, diff.removed_apis)
                }
            };
            store
                .put_velocity(&ApiVelocityMetric {
                    browser_key: record.browser_key.clone(),
                    prev_browser_key: record.prev_browser_key.clone(),
                    release_date: record.release_date,
                    total_apis: sequence.len(),
                    new_apis,
                    removed_apis,
                })
                .await?;
            prev_sequence = Some(sequence);
        }
        debug!(
            browser = %chain.browser_name,
            os = %chain.os_name,
            versions = chain.records.len(),
            "computed API velocity"
        );
    }
    Ok(())
}
