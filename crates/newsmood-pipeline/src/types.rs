use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PipelineError;
use crate::verdict::SentimentVerdict;

/// Key under which search providers list their organic hits.
const ORGANIC_RESULTS_KEY: &str = "organic_results";

/// Raw search provider payload, kept as an opaque JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResult(Map<String, Value>);

impl RawResult {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// An empty payload, used when the search stage degrades.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a JSON value. Returns `None` unless the value is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Explicit provider error message, if the payload carries one.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// Organic hits in provider order.
    ///
    /// Entries that are not objects, or lack a string `title`, are kept with
    /// `title: None` so that positions stay aligned with the provider's list.
    #[must_use]
    pub fn organic_results(&self) -> Vec<ResultItem> {
        self.0
            .get(ORGANIC_RESULTS_KEY)
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(ResultItem::from_entry).collect())
            .unwrap_or_default()
    }
}

/// One organic search hit. Only the title is read; other fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub title: Option<String>,
}

impl ResultItem {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    #[must_use]
    pub fn untitled() -> Self {
        Self { title: None }
    }

    fn from_entry(entry: &Value) -> Self {
        Self {
            title: entry
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// The title, unless it is missing or blank.
    #[must_use]
    pub fn eligible_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// A headline together with the verdict the model produced for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzedItem {
    pub title: String,
    pub sentiment: SentimentVerdict,
}

/// Partial update produced by the search stage.
#[derive(Debug, Clone)]
pub struct SearchUpdate {
    pub search_result: RawResult,
}

/// Partial update produced by the analysis stage.
#[derive(Debug, Clone)]
pub struct AnalysisUpdate {
    pub analyzed: Vec<AnalyzedItem>,
}

/// State threaded through the pipeline for a single query.
///
/// Each stage contributes its field exactly once through an update that the
/// state consumes; there are no setters.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    query: String,
    search_result: Option<RawResult>,
    analyzed: Vec<AnalyzedItem>,
}

impl PipelineState {
    /// Start a fresh state for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptyQuery`] if `query` is blank. A
    /// non-blank query is stored exactly as given.
    pub fn new(query: &str) -> Result<Self, PipelineError> {
        if query.trim().is_empty() {
            return Err(PipelineError::EmptyQuery);
        }
        Ok(Self {
            query: query.to_string(),
            search_result: None,
            analyzed: Vec::new(),
        })
    }

    #[must_use]
    pub fn apply_search(self, update: SearchUpdate) -> Self {
        debug_assert!(self.search_result.is_none(), "search result set twice");
        Self {
            search_result: Some(update.search_result),
            ..self
        }
    }

    #[must_use]
    pub fn apply_analysis(self, update: AnalysisUpdate) -> Self {
        debug_assert!(self.analyzed.is_empty(), "analysis applied twice");
        Self {
            analyzed: update.analyzed,
            ..self
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn search_result(&self) -> Option<&RawResult> {
        self.search_result.as_ref()
    }

    #[must_use]
    pub fn analyzed(&self) -> &[AnalyzedItem] {
        &self.analyzed
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn organic_results_preserve_order_and_missing_titles() {
        let raw = RawResult::from_value(json!({
            "search_metadata": { "status": "Success" },
            "organic_results": [
                { "title": "First", "link": "https://example.com/1" },
                { "link": "https://example.com/2" },
                "not-an-object",
                { "title": "Fourth" }
            ]
        }))
        .expect("object payload");

        let items = raw.organic_results();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].title.as_deref(), Some("First"));
        assert_eq!(items[1].title, None);
        assert_eq!(items[2].title, None);
        assert_eq!(items[3].title.as_deref(), Some("Fourth"));
    }

    #[test]
    fn missing_organic_results_yields_no_items() {
        let raw = RawResult::from_value(json!({ "news_results": [] })).unwrap();
        assert!(raw.organic_results().is_empty());
        assert_eq!(raw.keys(), vec!["news_results".to_string()]);
    }

    #[test]
    fn error_message_is_read_from_top_level() {
        let raw = RawResult::from_value(json!({ "error": "Invalid API key." })).unwrap();
        assert_eq!(raw.error_message(), Some("Invalid API key."));
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(RawResult::from_value(json!([1, 2, 3])).is_none());
        assert!(RawResult::from_value(json!("text")).is_none());
    }

    #[test]
    fn blank_titles_are_not_eligible() {
        assert_eq!(ResultItem::titled("Headline").eligible_title(), Some("Headline"));
        assert_eq!(ResultItem::titled("   ").eligible_title(), None);
        assert_eq!(ResultItem::titled("").eligible_title(), None);
        assert_eq!(ResultItem::untitled().eligible_title(), None);
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(matches!(
            PipelineState::new("  "),
            Err(PipelineError::EmptyQuery)
        ));
    }

    #[test]
    fn query_is_kept_verbatim() {
        let state = PipelineState::new("  câncer ").unwrap();
        assert_eq!(state.query(), "  câncer ");
    }

    #[test]
    fn updates_fill_state_once_each() {
        let state = PipelineState::new("cancer cure").unwrap();
        assert_eq!(state.query(), "cancer cure");
        assert!(state.search_result().is_none());

        let state = state.apply_search(SearchUpdate {
            search_result: RawResult::empty(),
        });
        assert!(state.search_result().is_some_and(RawResult::is_empty));

        let state = state.apply_analysis(AnalysisUpdate {
            analyzed: vec![AnalyzedItem {
                title: "Headline".to_string(),
                sentiment: SentimentVerdict::Raw("positive".to_string()),
            }],
        });
        assert_eq!(state.analyzed().len(), 1);
    }
}
