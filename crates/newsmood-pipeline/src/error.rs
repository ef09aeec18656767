use thiserror::Error;

/// Failures reported by a search provider.
///
/// These never escape the search stage; they are logged and collapsed into an
/// empty result set.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network, TLS or timeout failure talking to the provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with an explicit `"error"` payload.
    #[error("search provider error: {0}")]
    Provider(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-2xx status whose body carried no `"error"` message.
    #[error("unexpected HTTP status {status} from search provider")]
    UnexpectedStatus { status: u16 },

    #[error("invalid search base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("search API key is empty")]
    MissingApiKey,
}

/// Failures reported by a classification model.
///
/// Contained per item by the analysis stage.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model returned no content")]
    EmptyResponse,

    #[error("invalid model base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("model API key is empty")]
    MissingApiKey,

    /// Catch-all for capability implementations that are not HTTP backed.
    #[error("classification failed: {0}")]
    Other(String),
}

/// Faults that reach the caller of [`crate::Pipeline::invoke`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("query must not be empty")]
    EmptyQuery,
}
