//! # confluence-metrics
//!
//! The Confluence metrics engine: four interdependent batch calculators
//! (API velocity, failure-to-ship, vendor-specific, aggressive removal)
//! plus the shared version sequencer, sorted-diff engine, and temporal
//! snapshot synchronizer. All computation is expressed as chains of
//! dependent asynchronous queries against a `FactStore`; the calculators
//! are mutually independent and interleaved cooperatively by the engine.

pub mod aggressive_removal;
pub mod diff;
pub mod engine;
pub mod failure_to_ship;
pub mod matrix;
pub mod sequencer;
pub mod synchronizer;
pub mod velocity;
pub mod vendor_specific;

pub use engine::{ConfluenceEngine, RunSummary};
pub use sequencer::VersionChain;
pub use synchronizer::{Snapshot, Timeline};
