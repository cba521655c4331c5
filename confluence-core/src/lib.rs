//! # confluence-core
//!
//! Foundation crate for the Confluence metrics engine.
//! Defines domain types, composite keys, errors, config, the browser
//! release-history resolver, and the fact-store traits.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod facts;
pub mod history;
pub mod keys;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ConfluenceConfig;
pub use errors::{ConfluenceError, ConfluenceResult};
pub use facts::ApiFact;
pub use history::BrowserHistory;
pub use keys::{ApiKey, BrowserKey};
