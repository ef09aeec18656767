//! Analysis stage: classify up to [`MAX_ANALYZED_ITEMS`] headlines, one call each.

use serde::Serialize;

use crate::capability::ClassificationCapability;
use crate::types::{AnalyzedItem, ResultItem};
use crate::verdict::SentimentVerdict;

/// Only this many leading search items are ever examined.
pub const MAX_ANALYZED_ITEMS: usize = 5;

/// Characters of a title shown in log lines.
const TITLE_PREVIEW_CHARS: usize = 50;

/// Build the fixed classification instruction for one headline.
#[must_use]
pub fn build_prompt(title: &str) -> String {
    format!(
        "Classify the sentiment of the text below as Positive, Negative or Neutral.\n\
         Briefly explain the reason.\n\
         Respond ONLY with valid JSON using the keys \"label\" and \"reason\".\n\
         \n\
         Text:\n\
         {title}\n"
    )
}

/// What happened to one examined item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemOutcome {
    Analyzed,
    SkippedEmptyTitle,
    ClassificationFailed { error: String },
}

/// Per-item diagnostic; `position` is 1-based within the search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDiagnostic {
    pub position: usize,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

/// Result of one item, before it is folded into the stage outcome.
#[derive(Debug)]
pub(crate) enum ItemStep {
    Analyzed(AnalyzedItem),
    SkippedEmptyTitle,
    Failed(String),
}

/// Output of [`AnalysisStage::run`]: successes plus a parallel diagnostics list.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    pub analyzed: Vec<AnalyzedItem>,
    pub diagnostics: Vec<ItemDiagnostic>,
}

impl AnalysisOutcome {
    /// Fold one item step into the accumulated outcome.
    pub(crate) fn accumulate(mut self, position: usize, step: ItemStep) -> Self {
        let outcome = match step {
            ItemStep::Analyzed(item) => {
                self.analyzed.push(item);
                ItemOutcome::Analyzed
            }
            ItemStep::SkippedEmptyTitle => ItemOutcome::SkippedEmptyTitle,
            ItemStep::Failed(error) => ItemOutcome::ClassificationFailed { error },
        };
        self.diagnostics.push(ItemDiagnostic { position, outcome });
        self
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.outcome, ItemOutcome::ClassificationFailed { .. }))
            .count()
    }
}

pub struct AnalysisStage<C> {
    capability: C,
}

impl<C: ClassificationCapability> AnalysisStage<C> {
    #[must_use]
    pub fn new(capability: C) -> Self {
        Self { capability }
    }

    /// Classify the leading items in order.
    ///
    /// Blank titles inside the window are skipped without pulling in later
    /// items. A failed classification drops only that item. Never fails.
    pub async fn run(&self, items: &[ResultItem]) -> AnalysisOutcome {
        tracing::info!(candidates = items.len(), "starting sentiment analysis");

        if items.is_empty() {
            tracing::warn!("no search items to analyze");
            return AnalysisOutcome::default();
        }

        let mut outcome = AnalysisOutcome::default();
        for (index, item) in items.iter().take(MAX_ANALYZED_ITEMS).enumerate() {
            let position = index + 1;
            let step = self.analyze_item(position, item).await;
            outcome = outcome.accumulate(position, step);
        }

        tracing::info!(
            analyzed = outcome.analyzed.len(),
            failed = outcome.failed_count(),
            "sentiment analysis finished"
        );
        outcome
    }

    async fn analyze_item(&self, position: usize, item: &ResultItem) -> ItemStep {
        let Some(title) = item.eligible_title() else {
            tracing::debug!(position, "skipping item without a title");
            return ItemStep::SkippedEmptyTitle;
        };

        tracing::info!(
            position,
            of = MAX_ANALYZED_ITEMS,
            title = %preview(title),
            "classifying headline"
        );

        match self.capability.classify(&build_prompt(title)).await {
            Ok(output) => {
                let sentiment = SentimentVerdict::parse(&output);
                if sentiment.is_raw() {
                    tracing::debug!(position, "model output is not a JSON verdict; keeping raw text");
                }
                ItemStep::Analyzed(AnalyzedItem {
                    title: title.to_string(),
                    sentiment,
                })
            }
            Err(e) => {
                tracing::warn!(position, error = %e, "classification failed; dropping item");
                ItemStep::Failed(e.to_string())
            }
        }
    }
}

fn preview(title: &str) -> String {
    title.chars().take(TITLE_PREVIEW_CHARS).collect()
}
