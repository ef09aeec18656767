//! Seams to the external collaborators.
//!
//! The pipeline only talks to these traits, so any search provider or model
//! client (including in-memory doubles) can be plugged into
//! [`crate::Pipeline::new`].

use std::future::Future;

use crate::error::{ClassifyError, SearchError};
use crate::types::RawResult;

/// Runs a web search for a query.
pub trait SearchCapability {
    /// Issue one search call. Implementations must not retry.
    fn search(&self, query: &str) -> impl Future<Output = Result<RawResult, SearchError>> + Send;
}

/// Sends a prompt to a language model and returns its raw text answer.
pub trait ClassificationCapability {
    fn classify(&self, prompt: &str) -> impl Future<Output = Result<String, ClassifyError>> + Send;
}
