//! StorageEngine: owns the ConnectionPool and implements the FactStore and
//! MetricsSink contracts on top of the raw query modules.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use confluence_core::errors::ConfluenceResult;
use confluence_core::facts::ApiFact;
use confluence_core::history::BrowserHistory;
use confluence_core::keys::{ApiKey, BrowserKey};
use confluence_core::models::{ApiVelocityMetric, BrowserDataPoint, RemovedApiMetric};
use confluence_core::traits::{FactStore, MetricsSink};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::data_point_ops::{self, DataPointKind};
use crate::queries::{fact_ops, removal_ops, velocity_ops};

/// The main storage engine. Owns the connection pool and provides the full
/// FactStore + MetricsSink interface, plus read accessors for consumers.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, read_pool_size: usize) -> ConfluenceResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        info!(path = %path.display(), "opened fact store");
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> ConfluenceResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the writer.
    fn initialize(&self) -> ConfluenceResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Execute a read-only query on the best available connection.
    fn read<F, T>(&self, f: F) -> ConfluenceResult<T>
    where
        F: FnOnce(&Connection) -> ConfluenceResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    /// Validate and ingest facts, resolving each build's release date
    /// through the history table. Returns the number of rows inserted.
    pub async fn insert_facts(
        &self,
        facts: &[ApiFact],
        history: &BrowserHistory,
    ) -> ConfluenceResult<usize> {
        let mut rows = Vec::with_capacity(facts.len());
        let mut dates: FxHashMap<BrowserKey, DateTime<Utc>> = FxHashMap::default();
        for fact in facts {
            fact.validate()?;
            let key = fact.browser_key();
            let release_date = match dates.get(&key) {
                Some(date) => *date,
                None => {
                    let date = history.release_date(&key)?;
                    dates.insert(key, date);
                    date
                }
            };
            rows.push((fact.clone(), release_date));
        }
        let inserted = self
            .pool
            .writer
            .with_conn(move |conn| fact_ops::insert_facts(conn, &rows))
            .await?;
        debug!(inserted, "ingested facts");
        Ok(inserted)
    }

    // --- Read accessors for consumers and tests ---

    pub fn velocity_metrics(&self) -> ConfluenceResult<Vec<ApiVelocityMetric>> {
        self.read(velocity_ops::get_velocity_metrics)
    }

    pub fn failure_to_ship_points(&self) -> ConfluenceResult<Vec<BrowserDataPoint>> {
        self.read(|conn| data_point_ops::get_data_points(conn, DataPointKind::FailureToShip))
    }

    pub fn vendor_specific_points(&self) -> ConfluenceResult<Vec<BrowserDataPoint>> {
        self.read(|conn| data_point_ops::get_data_points(conn, DataPointKind::VendorSpecific))
    }

    pub fn removal_metrics(&self) -> ConfluenceResult<Vec<RemovedApiMetric>> {
        self.read(removal_ops::get_removal_metrics)
    }

    pub fn fact_count(&self) -> ConfluenceResult<usize> {
        self.read(fact_ops::count_facts)
    }
}

impl FactStore for StorageEngine {
    async fn browser_keys(&self) -> ConfluenceResult<Vec<BrowserKey>> {
        self.read(fact_ops::distinct_browser_keys)
    }

    async fn api_keys_for(&self, browser_key: &BrowserKey) -> ConfluenceResult<Vec<ApiKey>> {
        self.read(|conn| fact_ops::api_keys_for(conn, browser_key))
    }

    async fn api_keys_grouped(
        &self,
        browser_keys: &[BrowserKey],
    ) -> ConfluenceResult<FxHashMap<ApiKey, Vec<BrowserKey>>> {
        self.read(|conn| fact_ops::api_keys_grouped(conn, browser_keys))
    }

    async fn api_keys_present(
        &self,
        browser_keys: &[BrowserKey],
        candidates: &[ApiKey],
    ) -> ConfluenceResult<Vec<ApiKey>> {
        self.read(|conn| fact_ops::api_keys_present(conn, browser_keys, candidates))
    }

    async fn browser_keys_released_within(
        &self,
        exclude_browser_name: &str,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> ConfluenceResult<Vec<(BrowserKey, DateTime<Utc>)>> {
        self.read(|conn| {
            fact_ops::browser_keys_released_within(conn, exclude_browser_name, after, before)
        })
    }
}

impl MetricsSink for StorageEngine {
    async fn put_velocity(&self, metric: &ApiVelocityMetric) -> ConfluenceResult<()> {
        self.pool
            .writer
            .with_conn(|conn| velocity_ops::put_velocity(conn, metric))
            .await
    }

    async fn put_failure_to_ship(&self, point: &BrowserDataPoint) -> ConfluenceResult<()> {
        self.pool
            .writer
            .with_conn(|conn| {
                data_point_ops::put_data_point(conn, DataPointKind::FailureToShip, point)
            })
            .await
    }

    async fn put_vendor_specific(&self, point: &BrowserDataPoint) -> ConfluenceResult<()> {
        self.pool
            .writer
            .with_conn(|conn| {
                data_point_ops::put_data_point(conn, DataPointKind::VendorSpecific, point)
            })
            .await
    }

    async fn put_removal(&self, metric: &RemovedApiMetric) -> ConfluenceResult<()> {
        self.pool
            .writer
            .with_conn(|conn| removal_ops::put_removal(conn, metric))
            .await
    }
}
