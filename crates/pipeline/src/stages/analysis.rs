//! Analysis stage: turn review text into per-review food/service scores.

use crate::lexicon::{render_lexicon, DEFAULT_TIER};
use crate::traits::{Stage, StageKind};
use data_loader::RestaurantReviews;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use worker_client::WorkerRequest;

/// Scores reported by the analysis worker, one entry per review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub restaurant_name: String,
    pub food_scores: Vec<i64>,
    pub customer_service_scores: Vec<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisStage;

impl AnalysisStage {
    fn system_message() -> String {
        format!(
            "Você é o review_analysis_agent. Converta avaliações em escores 1..5 para COMIDA e ATENDIMENTO.\n\
             Mapeamento OBRIGATÓRIO (use SOMENTE estes adjetivos; não infira nada além deles):\n\
             {lexicon}\n\n\
             REGRAS ESTRITAS:\n\
             - Procure SOMENTE os adjetivos exatamente como escritos acima (sem diferenciar maiúsculas; acentos contam).\n\
             - Para cada avaliação:\n\
             \x20   - COMIDA = escore do adjetivo encontrado sobre a comida; se nenhum aparecer, use {default}/5.\n\
             \x20   - ATENDIMENTO = escore do adjetivo encontrado sobre o atendimento; se nenhum aparecer, use {default}/5.\n\
             - Se houver vários adjetivos para a MESMA dimensão, escolha o MAIS NEGATIVO (menor escore).\n\
             - Palavras fora do léxico (ex.: rápido, demorado, preço, porções, ambiente) DEVEM SER IGNORADAS.\n\
             - food_scores e customer_service_scores devem ter uma entrada por avaliação.\n\
             - Retorne SOMENTE JSON válido com as chaves restaurant_name, food_scores, customer_service_scores.\n\
             - NÃO chame nenhuma ferramenta.\n",
            lexicon = render_lexicon(),
            default = DEFAULT_TIER,
        )
    }

    fn answer_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "restaurant_name": {"type": "string"},
                "food_scores": {"type": "array", "items": {"type": "integer"}},
                "customer_service_scores": {"type": "array", "items": {"type": "integer"}},
            },
            "required": ["restaurant_name", "food_scores", "customer_service_scores"],
            "additionalProperties": false,
        })
    }
}

impl Stage for AnalysisStage {
    type Input = RestaurantReviews;
    type Output = AnalysisOutput;

    fn kind(&self) -> StageKind {
        StageKind::Analysis
    }

    fn request(&self, input: &RestaurantReviews) -> WorkerRequest {
        let joined = input
            .reviews
            .iter()
            .map(|review| format!("- {}", review))
            .collect::<Vec<_>>()
            .join("\n");

        WorkerRequest {
            agent: self.kind().agent_name().to_string(),
            system_message: Self::system_message(),
            instruction: format!(
                "Restaurante: {}\nAvaliações (uma por linha):\n{}\n\n\
                 Responda SOMENTE com JSON válido no schema a seguir (sem comentários):\n{}",
                input.restaurant_name,
                joined,
                Self::answer_schema()
            ),
            context: json!({
                "restaurant_name": input.restaurant_name,
                "review_count": input.reviews.len(),
            }),
            tools: Vec::new(),
        }
    }

    fn parse(&self, payload: Value) -> Result<AnalysisOutput, serde_json::Error> {
        serde_json::from_value(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews() -> RestaurantReviews {
        RestaurantReviews {
            restaurant_name: "Le Gourmet".to_string(),
            reviews: vec!["Comida incrível.".to_string(), "Atendimento ruim.".to_string()],
        }
    }

    #[test]
    fn test_request_lists_reviews_and_lexicon() {
        let request = AnalysisStage.request(&reviews());
        assert_eq!(request.agent, "review_analysis_agent");
        assert!(request.tools.is_empty());
        assert!(request.instruction.contains("- Comida incrível.\n- Atendimento ruim."));
        assert!(request.system_message.contains("4/5: bom, agradável, satisfatório"));
        assert!(request.system_message.contains("MAIS NEGATIVO"));
        assert!(request.instruction.starts_with("Restaurante: Le Gourmet\n"));
        assert_eq!(request.context["review_count"], 2);
    }

    #[test]
    fn test_parse_reply() {
        let out = AnalysisStage
            .parse(json!({
                "restaurant_name": "Le Gourmet",
                "food_scores": [5, 3],
                "customer_service_scores": [4, 5],
            }))
            .unwrap();
        assert_eq!(out.food_scores, vec![5, 3]);
        assert_eq!(out.customer_service_scores, vec![4, 5]);
    }

    #[test]
    fn test_parse_rejects_missing_or_fractional_scores() {
        assert!(AnalysisStage
            .parse(json!({"restaurant_name": "X", "food_scores": [5]}))
            .is_err());
        assert!(AnalysisStage
            .parse(json!({"restaurant_name": "X", "food_scores": [4.5], "customer_service_scores": [3]}))
            .is_err());
    }
}
