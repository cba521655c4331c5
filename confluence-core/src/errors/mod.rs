//! Error taxonomy for the metrics engine.
//!
//! Resolver and store failures are fatal to the enclosing calculator's chain
//! and surface as run-level errors; they are never retried.

mod config_error;
mod fact_error;
mod history_error;
mod metrics_error;
mod storage_error;

pub use config_error::ConfigError;
pub use fact_error::FactError;
pub use history_error::HistoryError;
pub use metrics_error::MetricsError;
pub use storage_error::StorageError;

/// Unified error for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fact(#[from] FactError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result alias used across all crates.
pub type ConfluenceResult<T> = Result<T, ConfluenceError>;
