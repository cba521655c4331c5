//! ConfluenceEngine: orchestrates a full metrics run.

use std::sync::Arc;

use tracing::info;

use confluence_core::config::MetricsConfig;
use confluence_core::errors::ConfluenceResult;
use confluence_core::history::BrowserHistory;
use confluence_core::traits::{FactStore, MetricsSink};

use crate::{aggressive_removal, failure_to_ship, sequencer, synchronizer, velocity, vendor_specific};

/// Shape of a completed run, for callers that want to log or assert on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub chains: usize,
    pub versions: usize,
    pub snapshots: usize,
}

/// The metrics engine. Reads the fact store and release history, writes the
/// four output collections through the sink side of the store.
pub struct ConfluenceEngine<S> {
    store: Arc<S>,
    history: Arc<BrowserHistory>,
    config: MetricsConfig,
}

impl<S> ConfluenceEngine<S>
where
    S: FactStore + MetricsSink,
{
    pub fn new(store: Arc<S>, history: Arc<BrowserHistory>, config: MetricsConfig) -> Self {
        Self {
            store,
            history,
            config,
        }
    }

    /// Recompute every derived collection from scratch.
    ///
    /// The shared prep (version chains, world snapshots) runs first; the
    /// four calculators are mutually independent and are interleaved
    /// cooperatively. A failure in any calculator aborts the run; partial
    /// output from the other collections is left behind but the caller sees
    /// the error, never a silently zeroed result.
    pub async fn run(&self) -> ConfluenceResult<RunSummary> {
        let browser_keys = self.store.browser_keys().await?;
        let chains = sequencer::build_chains(&browser_keys, &self.history)?;
        let timelines = synchronizer::timelines_from_chains(&chains);
        let snapshots = synchronizer::synchronize(&timelines);

        let summary = RunSummary {
            chains: chains.len(),
            versions: chains.iter().map(|c| c.records.len()).sum(),
            snapshots: snapshots.len(),
        };
        info!(
            chains = summary.chains,
            versions = summary.versions,
            snapshots = summary.snapshots,
            "starting metrics run"
        );

        tokio::try_join!(
            velocity::compute(self.store.as_ref(), &chains),
            failure_to_ship::compute(
                self.store.as_ref(),
                &snapshots,
                self.config.broadly_shipped_threshold,
            ),
            vendor_specific::compute(self.store.as_ref(), &snapshots),
            aggressive_removal::compute(
                self.store.as_ref(),
                &chains,
                self.config.removal_window_years,
            ),
        )?;

        info!("metrics run complete");
        Ok(summary)
    }
}
