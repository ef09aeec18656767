//! Rendering of the final pipeline state.

use std::fmt;

use chrono::{DateTime, Utc};
use newsmood_pipeline::{PipelineState, RunDiagnostics, SentimentVerdict};
use serde::Serialize;

const RULE_WIDTH: usize = 60;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    state: &'a PipelineState,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a RunDiagnostics>,
}

/// Build the JSON document printed by `--json`.
///
/// The raw search payload is left out; only the query and the analyzed
/// headlines are reported.
pub(crate) fn render_json(
    state: &PipelineState,
    diagnostics: Option<&RunDiagnostics>,
    generated_at: DateTime<Utc>,
) -> serde_json::Result<serde_json::Value> {
    let report = JsonReport {
        generated_at,
        state,
        diagnostics,
    };
    let mut value = serde_json::to_value(report)?;
    if let Some(fields) = value.as_object_mut() {
        fields.remove("search_result");
    }
    Ok(value)
}

/// Human-readable report, one block per analyzed headline.
pub(crate) struct TextReport<'a> {
    state: &'a PipelineState,
    generated_at: DateTime<Utc>,
}

impl<'a> TextReport<'a> {
    pub(crate) fn new(state: &'a PipelineState, generated_at: DateTime<Utc>) -> Self {
        Self {
            state,
            generated_at,
        }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "=== FINAL RESULT ===")?;
        writeln!(f, "Query: {}", self.state.query())?;
        writeln!(
            f,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;

        if self.state.analyzed().is_empty() {
            writeln!(f)?;
            return writeln!(f, "No results found.");
        }

        for (i, item) in self.state.analyzed().iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{rule}")?;
            writeln!(f, "Headline {}", i + 1)?;
            writeln!(f, "{rule}")?;
            writeln!(f, "Title: {}", item.title)?;
            writeln!(f)?;
            match &item.sentiment {
                SentimentVerdict::Structured { label, reason } => {
                    writeln!(f, "Sentiment: {label}")?;
                    writeln!(f, "Reason: {reason}")?;
                    if let Some(polarity) = item.sentiment.polarity() {
                        writeln!(f, "Polarity: {polarity}")?;
                    }
                }
                SentimentVerdict::Raw(text) => {
                    writeln!(f, "Sentiment:")?;
                    writeln!(f, "{}", text.trim_end())?;
                }
            }
        }

        Ok(())
    }
}
