//! Contracts between the engine and its collaborators.

mod fact_store;

pub use fact_store::{FactStore, MetricsSink};
