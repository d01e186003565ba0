//! Local capabilities workers may call.
//!
//! - `fetch_restaurant_data`: reviews for a restaurant, matched by normalized name
//! - `calculate_overall_score`: the deterministic score calculator
//!
//! Workers never compute these themselves; they ask the pipeline to run
//! them so results stay exact and reproducible.

use crate::scoring::calculate_overall_score;
use data_loader::{DataLoadError, Dataset};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};
use worker_client::{ToolDescriptor, ToolError, ToolHost};

pub const FETCH_TOOL: &str = "fetch_restaurant_data";
pub const SCORE_TOOL: &str = "calculate_overall_score";

pub fn fetch_tool_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: FETCH_TOOL.to_string(),
        description: "Obtém as avaliações de um restaurante específico.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {"restaurant_name": {"type": "string"}},
            "required": ["restaurant_name"],
        }),
    }
}

pub fn score_tool_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: SCORE_TOOL.to_string(),
        description: "Calcula a nota final de 0 a 10, com 3 casas decimais, a partir das listas de escores."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "restaurant_name": {"type": "string"},
                "food_scores": {"type": "array", "items": {"type": "integer"}},
                "customer_service_scores": {"type": "array", "items": {"type": "integer"}},
            },
            "required": ["restaurant_name", "food_scores", "customer_service_scores"],
        }),
    }
}

#[derive(Deserialize)]
struct FetchArgs {
    restaurant_name: String,
}

#[derive(Deserialize)]
struct ScoreArgs {
    restaurant_name: String,
    food_scores: Vec<i64>,
    customer_service_scores: Vec<i64>,
}

/// Tool host backed by the review dataset.
///
/// Meant to live for one pipeline run. The worker only ever sees a tool
/// failure as text, so the first dataset error a tool hits is also kept
/// here with its type; the caller collects it with
/// [`PipelineTools::take_dataset_error`].
#[derive(Debug)]
pub struct PipelineTools {
    dataset: Dataset,
    dataset_error: Mutex<Option<DataLoadError>>,
}

impl PipelineTools {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            dataset_error: Mutex::new(None),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The first dataset error raised by a tool call, if any.
    pub fn take_dataset_error(&self) -> Option<DataLoadError> {
        self.dataset_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn record_dataset_error(&self, error: DataLoadError) -> ToolError {
        warn!("{} could not read the dataset: {}", FETCH_TOOL, error);
        let tool_error = failed(FETCH_TOOL, &error);
        let mut slot = self
            .dataset_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(error);
        }
        tool_error
    }

    fn fetch(&self, arguments: &Value) -> Result<Value, ToolError> {
        let args: FetchArgs = parse_args(FETCH_TOOL, arguments)?;
        let found = self
            .dataset
            .fetch_restaurant_data(&args.restaurant_name)
            .map_err(|e| self.record_dataset_error(e))?;
        debug!("{} -> {} reviews", FETCH_TOOL, found.len());
        serde_json::to_value(found).map_err(|e| failed(FETCH_TOOL, e))
    }

    fn score(&self, arguments: &Value) -> Result<Value, ToolError> {
        let args: ScoreArgs = parse_args(SCORE_TOOL, arguments)?;
        let score = calculate_overall_score(
            &args.restaurant_name,
            &args.food_scores,
            &args.customer_service_scores,
        )
        .map_err(|e| failed(SCORE_TOOL, e))?;
        debug!("{} -> {:?}", SCORE_TOOL, score);
        Ok(json!(score))
    }
}

impl ToolHost for PipelineTools {
    fn call(&self, name: &str, arguments: &Value) -> Result<Value, ToolError> {
        match name {
            FETCH_TOOL => self.fetch(arguments),
            SCORE_TOOL => self.score(arguments),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, arguments: &Value) -> Result<T, ToolError> {
    T::deserialize(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

fn failed(tool: &str, error: impl std::fmt::Display) -> ToolError {
    ToolError::Failed {
        tool: tool.to_string(),
        reason: error.to_string(),
    }
}
