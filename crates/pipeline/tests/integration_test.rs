//! Integration tests for the pipeline.
//!
//! These tests run real stages through the StageRunner against stub workers
//! and a temporary dataset, the way the orchestrator wires them.

use async_trait::async_trait;
use data_loader::{Dataset, RestaurantReviews};
use pipeline::{
    AnalysisStage, FetchStage, PipelineTools, ScoreStage, StageFailure, StageKind, StageRunner,
    FETCH_TOOL, SCORE_TOOL,
};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use worker_client::{ToolHost, Worker, WorkerError, WorkerRequest};

fn create_test_dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Le Gourmet.A comida é incrível e o atendimento bom.").unwrap();
    writeln!(file, "none").unwrap();
    writeln!(file, "Cantina da María.Comida ruim.").unwrap();
    writeln!(file, "LE GOURMET.Comida mediana, atendimento impressionante.").unwrap();
    file
}

/// Stub worker that behaves like a well-mannered language model:
/// it calls the offered tool with the request context and relays the output.
struct ToolRelayWorker;

#[async_trait]
impl Worker for ToolRelayWorker {
    async fn invoke(&self, request: &WorkerRequest, tools: &dyn ToolHost) -> Result<String, WorkerError> {
        let tool = request.tools.first().map(|t| t.name.clone());
        match tool {
            Some(name) => {
                let output = tools
                    .call(&name, &request.context)
                    .map_err(|e| WorkerError::InvalidResponse(e.to_string()))?;
                Ok(format!("Here is the result:\n```json\n{}\n```", output))
            }
            None => Ok(json!({
                "restaurant_name": request.context["restaurant_name"],
                "food_scores": [5, 3],
                "customer_service_scores": [4, 5],
            })
            .to_string()),
        }
    }
}

/// Stub worker that always answers with fixed text
struct FixedWorker(&'static str);

#[async_trait]
impl Worker for FixedWorker {
    async fn invoke(&self, _request: &WorkerRequest, _tools: &dyn ToolHost) -> Result<String, WorkerError> {
        Ok(self.0.to_string())
    }
}

/// Stub worker that never answers in time
struct SlowWorker;

#[async_trait]
impl Worker for SlowWorker {
    async fn invoke(&self, _request: &WorkerRequest, _tools: &dyn ToolHost) -> Result<String, WorkerError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("{}".to_string())
    }
}

fn runner(worker: impl Worker + 'static, dataset: &NamedTempFile) -> StageRunner {
    let tools = PipelineTools::new(Dataset::at(dataset.path()));
    StageRunner::new(Arc::new(worker), Arc::new(tools))
}

#[tokio::test]
async fn test_three_stages_end_to_end() {
    let dataset = create_test_dataset();
    let runner = runner(ToolRelayWorker, &dataset);

    let fetched = runner.run(&FetchStage, "le gourmet").await.unwrap();
    assert_eq!(fetched.restaurant_name, "le gourmet");
    assert_eq!(fetched.reviews.len(), 2);
    assert!(fetched.reviews[0].contains("incrível"));

    let reviews = RestaurantReviews {
        restaurant_name: "Le Gourmet".to_string(),
        reviews: fetched.reviews,
    };
    let analysis = runner.run(&AnalysisStage, &reviews).await.unwrap();
    assert_eq!(analysis.food_scores, vec![5, 3]);
    assert_eq!(analysis.customer_service_scores, vec![4, 5]);

    let score = runner.run(&ScoreStage, &analysis).await.unwrap();
    assert_eq!(score.restaurant_name, "Le Gourmet");
    assert_eq!(score.value, 7.472);
}

#[tokio::test]
async fn test_prose_without_json_is_a_stage_failure() {
    let dataset = create_test_dataset();
    let runner = runner(FixedWorker("Sorry, I could not find that restaurant."), &dataset);

    let err = runner.run(&FetchStage, "Le Gourmet").await.unwrap_err();
    assert!(matches!(err, StageFailure::NoJson { stage: StageKind::Fetch, .. }));
}

#[tokio::test]
async fn test_wrong_shape_is_a_schema_failure() {
    let dataset = create_test_dataset();
    let runner = runner(FixedWorker(r#"{"restaurant_name": "X", "food_scores": "many"}"#), &dataset);

    let reviews = RestaurantReviews {
        restaurant_name: "X".to_string(),
        reviews: vec!["ok".to_string()],
    };
    let err = runner.run(&AnalysisStage, &reviews).await.unwrap_err();
    assert!(matches!(err, StageFailure::Schema { stage: StageKind::Analysis, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_enforced() {
    let dataset = create_test_dataset();
    let runner = runner(SlowWorker, &dataset).with_timeout(Some(Duration::from_secs(5)));

    let err = runner.run(&FetchStage, "Le Gourmet").await.unwrap_err();
    assert!(matches!(err, StageFailure::TimedOut { stage: StageKind::Fetch, .. }));
}

#[test]
fn test_tools_match_stage_contracts() {
    let dataset = create_test_dataset();
    let tools = PipelineTools::new(Dataset::at(dataset.path()));

    let fetched: Value = tools
        .call(FETCH_TOOL, &json!({"restaurant_name": "cantina da maria"}))
        .unwrap();
    assert_eq!(fetched["reviews"], json!(["Comida ruim."]));

    let scored = tools
        .call(
            SCORE_TOOL,
            &json!({"restaurant_name": "Cantina", "food_scores": [2], "customer_service_scores": [3]}),
        )
        .unwrap();
    assert!(scored["Cantina"].is_number());
}
