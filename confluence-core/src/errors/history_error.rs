/// Release-date resolver failures. Every calculator depends on release
/// dates, so either variant aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("{browser_name} not found in browser history")]
    UnknownBrowser { browser_name: String },

    #[error("{browser_key} not found in browser history")]
    UnknownVersion { browser_key: String },

    #[error("failed to load browser history from {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
