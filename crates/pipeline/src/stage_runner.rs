//! Runs a single stage against a worker.
//!
//! The runner is the only place that talks to the worker: it builds the
//! request, applies the optional per-stage timeout, extracts the JSON
//! object from the reply and hands it to the stage for parsing.

use crate::extract::{extract_json, ExtractError};
use crate::traits::{Stage, StageKind};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use worker_client::{ToolHost, Worker, WorkerError};

/// Why a stage produced no usable output
#[derive(Error, Debug)]
pub enum StageFailure {
    #[error("{stage} worker failed: {source}")]
    Worker {
        stage: StageKind,
        #[source]
        source: WorkerError,
    },

    #[error("{stage} worker did not answer within {after:?}")]
    TimedOut { stage: StageKind, after: Duration },

    #[error("{stage} worker reply contained no JSON: {source}")]
    NoJson {
        stage: StageKind,
        #[source]
        source: ExtractError,
    },

    #[error("{stage} worker reply has an unexpected shape: {source}")]
    Schema {
        stage: StageKind,
        #[source]
        source: serde_json::Error,
    },
}

impl StageFailure {
    pub fn stage(&self) -> StageKind {
        match self {
            StageFailure::Worker { stage, .. }
            | StageFailure::TimedOut { stage, .. }
            | StageFailure::NoJson { stage, .. }
            | StageFailure::Schema { stage, .. } => *stage,
        }
    }
}

/// Invokes stages against one worker and one tool host.
///
/// ## Usage
/// ```ignore
/// let runner = StageRunner::new(worker, tools).with_timeout(Some(Duration::from_secs(60)));
/// let fetched = runner.run(&FetchStage, "Le Gourmet").await?;
/// ```
#[derive(Clone)]
pub struct StageRunner {
    worker: Arc<dyn Worker>,
    tools: Arc<dyn ToolHost>,
    timeout: Option<Duration>,
}

impl StageRunner {
    pub fn new(worker: Arc<dyn Worker>, tools: Arc<dyn ToolHost>) -> Self {
        Self {
            worker,
            tools,
            timeout: None,
        }
    }

    /// Bound every stage invocation; `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run `stage` once. No retries.
    pub async fn run<S: Stage>(&self, stage: &S, input: &S::Input) -> Result<S::Output, StageFailure> {
        let kind = stage.kind();
        let request = stage.request(input);
        debug!("Running stage: {} (agent: {})", kind, request.agent);

        let call = self.worker.invoke(&request, &*self.tools);
        let reply = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                warn!("Stage {} timed out after {:?}", kind, limit);
                StageFailure::TimedOut { stage: kind, after: limit }
            })?,
            None => call.await,
        }
        .map_err(|source| {
            warn!("Stage {} worker error: {}", kind, source);
            StageFailure::Worker { stage: kind, source }
        })?;

        let payload = extract_json(&reply).map_err(|source| {
            warn!("Stage {} reply had no JSON object", kind);
            StageFailure::NoJson { stage: kind, source }
        })?;
        debug!("Stage {} payload: {}", kind, payload);

        stage
            .parse(payload)
            .map_err(|source| StageFailure::Schema { stage: kind, source })
    }
}
