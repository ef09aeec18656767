//! Search stage: one provider call, failures degrade to an empty result set.

use serde::Serialize;

use crate::capability::SearchCapability;
use crate::error::SearchError;
use crate::types::{RawResult, ResultItem};

/// Why the search stage produced the items it did.
///
/// Diagnostic only: every status other than `Found` yields empty items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchStatus {
    Found { count: usize },
    NoOrganicResults { available_keys: Vec<String> },
    ProviderError { message: String },
    Unavailable { message: String },
}

impl SearchStatus {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            SearchStatus::ProviderError { .. } | SearchStatus::Unavailable { .. }
        )
    }
}

/// Output of [`SearchStage::run`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub items: Vec<ResultItem>,
    pub raw: RawResult,
    pub status: SearchStatus,
}

impl SearchOutcome {
    fn degraded(status: SearchStatus) -> Self {
        Self {
            items: Vec::new(),
            raw: RawResult::empty(),
            status,
        }
    }
}

pub struct SearchStage<S> {
    capability: S,
}

impl<S: SearchCapability> SearchStage<S> {
    #[must_use]
    pub fn new(capability: S) -> Self {
        Self { capability }
    }

    /// Run one search for `query`.
    ///
    /// Never fails. Transport faults and provider error payloads are logged
    /// and turned into an empty item list.
    pub async fn run(&self, query: &str) -> SearchOutcome {
        tracing::info!(query, "running search");

        match self.capability.search(query).await {
            Ok(raw) => Self::outcome_from_raw(query, raw),
            Err(SearchError::Provider(message)) => {
                tracing::warn!(query, error = %message, "search provider returned an error");
                SearchOutcome::degraded(SearchStatus::ProviderError { message })
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "search provider unavailable");
                SearchOutcome::degraded(SearchStatus::Unavailable {
                    message: e.to_string(),
                })
            }
        }
    }

    fn outcome_from_raw(query: &str, raw: RawResult) -> SearchOutcome {
        // Some providers report errors in-band with a success status.
        if let Some(message) = raw.error_message() {
            tracing::warn!(query, error = %message, "search provider returned an error");
            return SearchOutcome::degraded(SearchStatus::ProviderError {
                message: message.to_string(),
            });
        }

        let items = raw.organic_results();
        if items.is_empty() {
            let available_keys = raw.keys();
            tracing::info!(
                query,
                keys = ?available_keys,
                "search returned no organic results"
            );
            return SearchOutcome {
                items,
                raw,
                status: SearchStatus::NoOrganicResults { available_keys },
            };
        }

        tracing::info!(
            query,
            count = items.len(),
            first_title = items[0].title.as_deref().unwrap_or("<untitled>"),
            "search completed"
        );
        SearchOutcome {
            status: SearchStatus::Found { count: items.len() },
            items,
            raw,
        }
    }
}
