//! Headline sentiment pipeline.
//!
//! Searches the web for a query through a [`SearchCapability`], classifies the
//! leading headlines with a [`ClassificationCapability`], and returns the
//! resulting [`PipelineState`]. Provider failures degrade to empty results and
//! per-headline model failures drop only that headline.

pub mod analysis;
pub mod capability;
pub mod error;
pub mod pipeline;
pub mod search;
pub mod types;
pub mod verdict;

mod mistral;
mod sources;

pub use analysis::{AnalysisOutcome, AnalysisStage, ItemDiagnostic, ItemOutcome, MAX_ANALYZED_ITEMS};
pub use capability::{ClassificationCapability, SearchCapability};
pub use error::{ClassifyError, PipelineError, SearchError};
pub use mistral::{MistralClient, DEFAULT_MODEL as DEFAULT_MISTRAL_MODEL};
pub use pipeline::{Pipeline, RunDiagnostics};
pub use search::{SearchOutcome, SearchStage, SearchStatus};
pub use sources::SerpApiClient;
pub use types::{AnalyzedItem, PipelineState, RawResult, ResultItem};
pub use verdict::{SentimentLabel, SentimentVerdict};
