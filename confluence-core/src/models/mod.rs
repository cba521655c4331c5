//! Derived entities produced by the calculators. All are immutable once
//! computed; a full run recomputes everything from scratch.

mod data_point;
mod removal;
mod velocity;
mod version_record;

pub use data_point::BrowserDataPoint;
pub use removal::RemovedApiMetric;
pub use velocity::ApiVelocityMetric;
pub use version_record::VersionRecord;
