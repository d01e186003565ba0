//! Terminal failures of a pipeline run.
//!
//! Every run either completes or stops with exactly one of these. Dataset
//! and score validation errors pass through unchanged; worker trouble is
//! reported as the unavailability of the stage it happened in.

use data_loader::DataLoadError;
use pipeline::{ScoreError, StageFailure};
use thiserror::Error;
use worker_client::WorkerError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not identify a restaurant name in the query")]
    NameNotResolved,

    #[error("Could not reach the review fetch worker: {0}")]
    FetchUnavailable(#[source] StageFailure),

    #[error("The review fetch worker returned no reviews for '{restaurant_name}'")]
    EmptyFetchResult { restaurant_name: String },

    #[error("Could not reach the review analysis worker: {0}")]
    AnalysisUnavailable(#[source] StageFailure),

    #[error("Could not reach the score worker: {0}")]
    ScoreUnavailable(#[source] StageFailure),

    #[error(transparent)]
    Dataset(#[from] DataLoadError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Worker(#[from] WorkerError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
