/// Rejection of malformed input facts at ingestion, upstream of the
/// calculators.
#[derive(Debug, thiserror::Error)]
pub enum FactError {
    #[error("malformed fact: missing {field}")]
    MissingField { field: &'static str },

    #[error("malformed browser key: {key}")]
    MalformedBrowserKey { key: String },

    #[error("malformed api key: {key}")]
    MalformedApiKey { key: String },
}
