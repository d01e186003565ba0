//! Fetch stage: ask the worker for a restaurant's reviews.

use crate::tools::fetch_tool_descriptor;
use crate::traits::{Stage, StageKind};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use worker_client::WorkerRequest;

const SYSTEM_MESSAGE: &str = "Você é o data_fetch_agent. \
Use SEMPRE a ferramenta fetch_restaurant_data para obter as avaliações e \
responda EXATAMENTE com o JSON retornado pela ferramenta, sem comentários.";

/// Reviews reported by the fetch worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOutput {
    pub restaurant_name: String,
    pub reviews: Vec<String>,
}

/// Input: the resolved restaurant name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchStage;

impl Stage for FetchStage {
    type Input = str;
    type Output = FetchOutput;

    fn kind(&self) -> StageKind {
        StageKind::Fetch
    }

    fn request(&self, input: &str) -> WorkerRequest {
        WorkerRequest {
            agent: self.kind().agent_name().to_string(),
            system_message: SYSTEM_MESSAGE.to_string(),
            instruction: format!("Quero as avaliações de \"{}\".", input.trim()),
            context: json!({ "restaurant_name": input.trim() }),
            tools: vec![fetch_tool_descriptor()],
        }
    }

    /// Accepts `{restaurant_name, reviews}` and the keyed `{<name>: [reviews...]}` form.
    fn parse(&self, payload: Value) -> Result<FetchOutput, serde_json::Error> {
        if payload.get("restaurant_name").is_some() {
            return serde_json::from_value(payload);
        }

        let keyed: serde_json::Map<String, Value> = serde_json::from_value(payload)?;
        if keyed.len() != 1 {
            return Err(serde_json::Error::custom(format!(
                "keyed fetch reply must hold exactly one restaurant, found {}",
                keyed.len()
            )));
        }
        let Some((restaurant_name, reviews)) = keyed.into_iter().next() else {
            return Err(serde_json::Error::custom("fetch reply is an empty object"));
        };
        Ok(FetchOutput {
            restaurant_name,
            reviews: serde_json::from_value(reviews)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_offers_fetch_tool() {
        let request = FetchStage.request(" Le Gourmet ");
        assert_eq!(request.agent, "data_fetch_agent");
        assert_eq!(request.instruction, "Quero as avaliações de \"Le Gourmet\".");
        assert!(request.allows_tool("fetch_restaurant_data"));
        assert!(!request.allows_tool("calculate_overall_score"));
    }

    #[test]
    fn test_parse_structured_reply() {
        let out = FetchStage
            .parse(json!({"restaurant_name": "Le Gourmet", "reviews": ["a", "b"]}))
            .unwrap();
        assert_eq!(out.restaurant_name, "Le Gourmet");
        assert_eq!(out.reviews, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_keyed_reply() {
        let out = FetchStage.parse(json!({"Le Gourmet": ["a"]})).unwrap();
        assert_eq!(out.restaurant_name, "Le Gourmet");
        assert_eq!(out.reviews, vec!["a"]);
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(FetchStage.parse(json!({})).is_err());
        assert!(FetchStage.parse(json!({"Le Gourmet": "not a list"})).is_err());
        assert!(FetchStage.parse(json!({"restaurant_name": "X"})).is_err());
        assert!(FetchStage.parse(json!({"A": ["a"], "B": ["b"]})).is_err());
    }
}
