//! Core traits for pipeline stages.
//!
//! A stage knows how to phrase its request to a worker and how to read the
//! JSON the worker answers with. Running it (invoking the worker, timing it
//! out, extracting the JSON) is the job of [`crate::StageRunner`].

use serde_json::Value;
use std::fmt;
use worker_client::WorkerRequest;

/// The three worker-backed steps of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Fetch,
    Analysis,
    Score,
}

impl StageKind {
    /// Agent name the worker sees for this stage
    pub fn agent_name(&self) -> &'static str {
        match self {
            StageKind::Fetch => "data_fetch_agent",
            StageKind::Analysis => "review_analysis_agent",
            StageKind::Score => "score_agent",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Fetch => f.write_str("fetch"),
            StageKind::Analysis => f.write_str("analysis"),
            StageKind::Score => f.write_str("score"),
        }
    }
}

/// One worker-backed pipeline stage.
///
/// ## Design Note
/// - Stages are stateless; the same value can serve any number of runs
/// - `parse` receives the JSON object already extracted from the reply
pub trait Stage: Send + Sync {
    type Input: ?Sized + Sync;
    type Output;

    fn kind(&self) -> StageKind;

    /// Build the worker request for `input`.
    fn request(&self, input: &Self::Input) -> WorkerRequest;

    /// Interpret the extracted JSON payload.
    fn parse(&self, payload: Value) -> Result<Self::Output, serde_json::Error>;
}
