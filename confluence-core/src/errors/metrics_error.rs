/// Calculator-level failures.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// A version chain referenced a browser key the fact store has no
    /// sequence for. Indicates an inconsistent store, not an empty family.
    #[error("no stored API sequence for {browser_key}")]
    MissingSequence { browser_key: String },
}
