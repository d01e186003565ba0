//! # Review Orchestrator
//!
//! This module coordinates one review-to-score run:
//! 1. Resolve the restaurant name from the user query
//! 2. Fetch its reviews (worker + `fetch_restaurant_data`)
//! 3. Analyze the reviews into per-review food/service scores (worker)
//! 4. Check the scores against the review list
//! 5. Compute the aggregate (worker + `calculate_overall_score`)
//!
//! Stages run strictly in sequence; each one consumes the previous stage's
//! validated output. Nothing is retried and nothing is cached between runs.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{error, info, warn};

use data_loader::{Dataset, RestaurantReviews, normalize};
use pipeline::{
    AggregateScore, AnalysisOutput, AnalysisStage, FetchStage, PipelineTools, ScoreError,
    ScorePair, ScoreStage, StageRunner, score_pairs,
};
use worker_client::{GrpcWorker, Worker, WorkerConfig};

use crate::error::{PipelineError, Result};
use crate::state::PipelineState;

/// Settings for building an orchestrator
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Explicit dataset file; `None` uses the default search order
    pub dataset_path: Option<PathBuf>,
    /// Upper bound on each stage's worker call; `None` waits indefinitely
    pub stage_timeout: Option<Duration>,
}

/// Everything one successful run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub restaurant_name: String,
    pub reviews: Vec<String>,
    pub scores: Vec<ScorePair>,
    pub aggregate: AggregateScore,
}

impl PipelineResult {
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Human-readable one-line outcome.
    pub fn summary(&self) -> String {
        let n = self.review_count();
        format!(
            "A avaliação média do {} é {:.3} (Base: {} {}).",
            self.aggregate.restaurant_name,
            self.aggregate.value,
            n,
            if n == 1 { "avaliação" } else { "avaliações" }
        )
    }
}

/// Main orchestrator that coordinates the review pipeline
///
/// Each run gets its own tool host and stage runner; only the dataset
/// handle and the worker are shared between runs.
#[derive(Clone)]
pub struct ReviewOrchestrator {
    dataset: Dataset,
    worker: Arc<dyn Worker>,
    stage_timeout: Option<Duration>,
}

impl ReviewOrchestrator {
    /// Create an orchestrator around an existing worker.
    ///
    /// The dataset is located here, so a missing file fails construction
    /// instead of the first run.
    pub fn new(config: OrchestratorConfig, worker: Arc<dyn Worker>) -> Result<Self> {
        let dataset = Dataset::locate(config.dataset_path.as_deref())?;
        Ok(Self {
            dataset,
            worker,
            stage_timeout: config.stage_timeout,
        })
    }

    /// Validate `worker_config`, locate the dataset, then connect to the worker service.
    pub async fn connect(config: OrchestratorConfig, worker_config: WorkerConfig) -> Result<Self> {
        worker_config.validate()?;
        Dataset::locate(config.dataset_path.as_deref())?;
        let worker = GrpcWorker::connect(worker_config).await?;
        Self::new(config, Arc::new(worker))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Main entry point: score the restaurant named in `query`.
    pub async fn run(&self, query: &str) -> Result<PipelineResult> {
        let start_time = Instant::now();
        let mut state = PipelineState::Resolving;

        match self.run_stages(query, &mut state).await {
            Ok(result) => {
                info!("{}", result.summary());
                info!("Pipeline finished in {:.2?}", start_time.elapsed());
                Ok(result)
            }
            Err(err) => {
                error!("Pipeline failed while {}: {}", state, err);
                advance(&mut state, PipelineState::Failed);
                Err(err)
            }
        }
    }

    async fn run_stages(&self, query: &str, state: &mut PipelineState) -> Result<PipelineResult> {
        let tools = Arc::new(PipelineTools::new(self.dataset.clone()));
        let runner = StageRunner::new(Arc::clone(&self.worker), tools.clone())
            .with_timeout(self.stage_timeout);

        let resolved = self.resolve_name(query)?;
        advance(state, state.next());

        let fetched = self.fetch_reviews(&runner, &tools, &resolved).await?;
        advance(state, state.next());

        let analysis = self.analyze_reviews(&runner, &fetched).await?;
        let scores = self.check_analysis(&analysis, fetched.len())?;
        advance(state, state.next());

        let aggregate = self.compute_score(&runner, &analysis).await?;
        advance(state, state.next());

        Ok(PipelineResult {
            restaurant_name: fetched.restaurant_name,
            reviews: fetched.reviews,
            scores,
            aggregate,
        })
    }

    fn resolve_name(&self, query: &str) -> Result<String> {
        let resolution = resolver::resolve(query, &self.dataset)?;
        let resolution = resolution.ok_or(PipelineError::NameNotResolved)?;
        info!("Resolved '{}' (via {})", resolution.name, resolution.source);
        Ok(resolution.name)
    }

    /// Fetch reviews; the worker's restaurant name wins when it normalizes
    /// differently from the resolved guess.
    ///
    /// A dataset error hit by the fetch tool ends the run as that error,
    /// whatever the worker made of the failed tool call.
    async fn fetch_reviews(
        &self,
        runner: &StageRunner,
        tools: &PipelineTools,
        resolved: &str,
    ) -> Result<RestaurantReviews> {
        let outcome = runner.run(&FetchStage, resolved).await;
        if let Some(err) = tools.take_dataset_error() {
            return Err(PipelineError::Dataset(err));
        }
        let fetched = outcome.map_err(PipelineError::FetchUnavailable)?;

        if fetched.reviews.is_empty() {
            return Err(PipelineError::EmptyFetchResult {
                restaurant_name: resolved.to_string(),
            });
        }

        let worker_name = fetched.restaurant_name.trim();
        let restaurant_name = if !worker_name.is_empty() && normalize(worker_name) != normalize(resolved) {
            info!("Fetch worker reported '{}' instead of '{}'; using it", worker_name, resolved);
            worker_name.to_string()
        } else {
            resolved.to_string()
        };

        info!("Fetched {} reviews for '{}'", fetched.reviews.len(), restaurant_name);
        Ok(RestaurantReviews {
            restaurant_name,
            reviews: fetched.reviews,
        })
    }

    async fn analyze_reviews(&self, runner: &StageRunner, reviews: &RestaurantReviews) -> Result<AnalysisOutput> {
        let analysis = runner
            .run(&AnalysisStage, reviews)
            .await
            .map_err(PipelineError::AnalysisUnavailable)?;
        info!(
            "Analysis for '{}': food={:?} service={:?}",
            analysis.restaurant_name, analysis.food_scores, analysis.customer_service_scores
        );
        Ok(analysis)
    }

    /// The analysis must rate every fetched review, each within 1..=5.
    fn check_analysis(&self, analysis: &AnalysisOutput, review_count: usize) -> Result<Vec<ScorePair>> {
        let pairs = score_pairs(&analysis.food_scores, &analysis.customer_service_scores)?;
        if pairs.len() != review_count {
            warn!(
                "Analysis rated {} reviews but {} were fetched",
                pairs.len(),
                review_count
            );
            return Err(ScoreError::ScoreListLengthMismatch {
                expected: review_count,
                food: analysis.food_scores.len(),
                service: analysis.customer_service_scores.len(),
            }
            .into());
        }
        Ok(pairs)
    }

    async fn compute_score(&self, runner: &StageRunner, analysis: &AnalysisOutput) -> Result<AggregateScore> {
        let aggregate = runner
            .run(&ScoreStage, analysis)
            .await
            .map_err(PipelineError::ScoreUnavailable)?;
        info!("Final score: {{{:?}: {}}}", aggregate.restaurant_name, aggregate.value);
        Ok(aggregate)
    }
}

fn advance(state: &mut PipelineState, next: PipelineState) {
    info!("Pipeline state: {} -> {}", state, next);
    *state = next;
}
