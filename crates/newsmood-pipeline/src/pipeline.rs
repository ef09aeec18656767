//! Pipeline orchestration: search, then analysis, then done.

use serde::Serialize;

use crate::analysis::{AnalysisOutcome, AnalysisStage, ItemDiagnostic};
use crate::capability::{ClassificationCapability, SearchCapability};
use crate::error::PipelineError;
use crate::search::{SearchOutcome, SearchStage, SearchStatus};
use crate::types::{AnalysisUpdate, PipelineState, SearchUpdate};

/// Diagnostics gathered during one invocation.
///
/// Kept apart from [`PipelineState`], which deliberately does not tell a
/// provider error apart from an empty result set.
#[derive(Debug, Clone, Serialize)]
pub struct RunDiagnostics {
    pub search: SearchStatus,
    pub items: Vec<ItemDiagnostic>,
}

/// Two-stage headline sentiment pipeline.
///
/// Each call to [`Pipeline::invoke`] builds fresh state; nothing is cached
/// between queries.
pub struct Pipeline<S, C> {
    search: SearchStage<S>,
    analysis: AnalysisStage<C>,
}

impl<S, C> Pipeline<S, C>
where
    S: SearchCapability,
    C: ClassificationCapability,
{
    #[must_use]
    pub fn new(search: S, classifier: C) -> Self {
        Self {
            search: SearchStage::new(search),
            analysis: AnalysisStage::new(classifier),
        }
    }

    /// Run the pipeline for `query` and return the final state.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptyQuery`] for a blank query. Search and
    /// classification failures are contained by their stages.
    pub async fn invoke(&self, query: &str) -> Result<PipelineState, PipelineError> {
        self.invoke_with_diagnostics(query)
            .await
            .map(|(state, _)| state)
    }

    /// Like [`Pipeline::invoke`], also returning per-stage diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptyQuery`] for a blank query.
    pub async fn invoke_with_diagnostics(
        &self,
        query: &str,
    ) -> Result<(PipelineState, RunDiagnostics), PipelineError> {
        let state = PipelineState::new(query)?;

        let SearchOutcome { items, raw, status } = self.search.run(state.query()).await;
        let state = state.apply_search(SearchUpdate { search_result: raw });

        let AnalysisOutcome {
            analyzed,
            diagnostics,
        } = self.analysis.run(&items).await;
        let state = state.apply_analysis(AnalysisUpdate { analyzed });

        tracing::info!(
            query = state.query(),
            analyzed = state.analyzed().len(),
            "pipeline finished"
        );

        Ok((
            state,
            RunDiagnostics {
                search: status,
                items: diagnostics,
            },
        ))
    }
}
