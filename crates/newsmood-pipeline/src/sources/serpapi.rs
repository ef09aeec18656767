//! `SerpAPI` search client.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::{Map, Value};

use crate::capability::SearchCapability;
use crate::error::SearchError;
use crate::types::RawResult;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";
const SEARCH_PATH: &str = "search.json";

/// Client for the `SerpAPI` search endpoint.
///
/// Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    engine: String,
    endpoint: Url,
}

impl SerpApiClient {
    /// Creates a client pointed at the production `SerpAPI` host.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingApiKey`] for a blank key or
    /// [`SearchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, engine: &str, timeout_secs: u64) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, engine, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingApiKey`] for a blank key,
    /// [`SearchError::InvalidBaseUrl`] if `base_url` does not parse, or
    /// [`SearchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        engine: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        if api_key.trim().is_empty() {
            return Err(SearchError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsmood/0.1 (headline-sentiment)")
            .build()?;

        // Exactly one trailing slash, so joining replaces nothing.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_PATH))
            .map_err(|e| SearchError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_owned(),
            engine: engine.to_owned(),
            endpoint,
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// See [`SerpApiClient::with_base_url`].
    pub fn from_config(config: &newsmood_core::AppConfig) -> Result<Self, SearchError> {
        Self::with_base_url(
            &config.serpapi_api_key,
            &config.search_engine,
            config.request_timeout_secs,
            config.serpapi_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        )
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("engine", &self.engine)
            .append_pair("q", query)
            .append_pair("api_key", &self.api_key);
        url
    }
}

impl SearchCapability for SerpApiClient {
    /// One GET per query.
    ///
    /// An `"error"` field in the body is reported as [`SearchError::Provider`]
    /// whatever the HTTP status, since `SerpAPI` pairs its 4xx answers with
    /// an explanatory message.
    async fn search(&self, query: &str) -> Result<RawResult, SearchError> {
        let response = self.client.get(self.build_url(query)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed = serde_json::from_str::<Map<String, Value>>(&body);

        if let Ok(fields) = &parsed {
            if let Some(message) = fields.get("error").and_then(Value::as_str) {
                return Err(SearchError::Provider(message.to_string()));
            }
        }

        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let fields = parsed.map_err(|e| SearchError::Deserialize {
            context: format!("search(q={query})"),
            source: e,
        })?;

        Ok(RawResult::new(fields))
    }
}
