use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;

use crate::errors::ConfluenceResult;
use crate::keys::{ApiKey, BrowserKey};
use crate::models::{ApiVelocityMetric, BrowserDataPoint, RemovedApiMetric};

/// Read-only query surface over the immutable API facts.
///
/// All operations are asynchronous; calculators are chains of dependent
/// queries sequenced with `.await`. Implementations must return sorted
/// sequences where documented; the diff engine relies on it.
#[allow(async_fn_in_trait)]
pub trait FactStore {
    /// Distinct browser keys with at least one stored fact, ascending.
    async fn browser_keys(&self) -> ConfluenceResult<Vec<BrowserKey>>;

    /// The API keys exposed by one browser build, ascending.
    async fn api_keys_for(&self, browser_key: &BrowserKey) -> ConfluenceResult<Vec<ApiKey>>;

    /// Group facts by API key across only the given browser builds:
    /// api key -> owning browser keys (each owner list ascending).
    async fn api_keys_grouped(
        &self,
        browser_keys: &[BrowserKey],
    ) -> ConfluenceResult<FxHashMap<ApiKey, Vec<BrowserKey>>>;

    /// Distinct API keys among `candidates` that any of the given browser
    /// builds exposes.
    async fn api_keys_present(
        &self,
        browser_keys: &[BrowserKey],
        candidates: &[ApiKey],
    ) -> ConfluenceResult<Vec<ApiKey>>;

    /// Browser builds of *other* browser names released strictly inside
    /// (after, before), with their release dates, ordered by release date
    /// then key.
    async fn browser_keys_released_within(
        &self,
        exclude_browser_name: &str,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> ConfluenceResult<Vec<(BrowserKey, DateTime<Utc>)>>;
}

/// Append-only writers for the four output collections. Each calculator
/// owns its collection and never mutates entries after creation.
#[allow(async_fn_in_trait)]
pub trait MetricsSink {
    async fn put_velocity(&self, metric: &ApiVelocityMetric) -> ConfluenceResult<()>;

    async fn put_failure_to_ship(&self, point: &BrowserDataPoint) -> ConfluenceResult<()>;

    async fn put_vendor_specific(&self, point: &BrowserDataPoint) -> ConfluenceResult<()>;

    async fn put_removal(&self, metric: &RemovedApiMetric) -> ConfluenceResult<()>;
}
