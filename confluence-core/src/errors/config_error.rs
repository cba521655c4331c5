/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}
