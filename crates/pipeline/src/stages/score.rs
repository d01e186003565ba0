//! Score stage: have the worker call the score calculator.

use crate::scoring::AggregateScore;
use crate::stages::analysis::AnalysisOutput;
use crate::tools::score_tool_descriptor;
use crate::traits::{Stage, StageKind};
use serde::de::Error as _;
use serde_json::{json, Value};
use worker_client::WorkerRequest;

const SYSTEM_MESSAGE: &str = "Você é o score_agent. \
Dadas as listas de escores e o nome do restaurante, use SEMPRE a ferramenta \
calculate_overall_score e responda EXATAMENTE com o JSON retornado.";

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreStage;

impl Stage for ScoreStage {
    type Input = AnalysisOutput;
    type Output = AggregateScore;

    fn kind(&self) -> StageKind {
        StageKind::Score
    }

    fn request(&self, input: &AnalysisOutput) -> WorkerRequest {
        WorkerRequest {
            agent: self.kind().agent_name().to_string(),
            system_message: SYSTEM_MESSAGE.to_string(),
            instruction: format!(
                "Calcule a pontuação chamando a ferramenta calculate_overall_score com os argumentos abaixo, \
                 e responda EXATAMENTE com o JSON da ferramenta:\n\
                 restaurant_name: {}\nfood_scores: {:?}\ncustomer_service_scores: {:?}",
                input.restaurant_name, input.food_scores, input.customer_service_scores
            ),
            context: json!({
                "restaurant_name": input.restaurant_name,
                "food_scores": input.food_scores,
                "customer_service_scores": input.customer_service_scores,
            }),
            tools: vec![score_tool_descriptor()],
        }
    }

    /// Expects the calculator's `{name: score}` map with exactly one entry.
    fn parse(&self, payload: Value) -> Result<AggregateScore, serde_json::Error> {
        let scores: serde_json::Map<String, Value> = serde_json::from_value(payload)?;
        if scores.len() != 1 {
            return Err(serde_json::Error::custom(format!(
                "score reply must hold exactly one restaurant, found {}",
                scores.len()
            )));
        }
        let Some((restaurant_name, value)) = scores.into_iter().next() else {
            return Err(serde_json::Error::custom("score reply is an empty object"));
        };
        let value = value.as_f64().ok_or_else(|| {
            serde_json::Error::custom(format!("score for {restaurant_name} is not a number: {value}"))
        })?;
        Ok(AggregateScore {
            restaurant_name,
            value,
        })
    }
}
