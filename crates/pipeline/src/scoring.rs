//! Aggregate restaurant score from per-review food/service ratings.
//!
//! ## Formula
//! For each review `i`: `sqrt(food[i]^2 * service[i])`. The sum is divided by
//! `n * sqrt(125)` (the per-review maximum, 5^2 * 5) and scaled to 0..10.
//! Food weighs quadratically: bad food cannot be rescued by good service,
//! while bad service still caps a perfect food score.
//!
//! The result is rounded to 3 decimals after adding `1e-12`, so values that
//! sit exactly on a half step round up.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 5;

const ROUNDING_EPSILON: f64 = 1e-12;

/// The rated dimension of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Food,
    Service,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Food => f.write_str("food"),
            Dimension::Service => f.write_str("service"),
        }
    }
}

/// Validation failures of the score calculator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Score lists must not be empty")]
    EmptyScoreList,

    #[error("Score list lengths do not match (expected {expected}, food {food}, service {service})")]
    ScoreListLengthMismatch {
        expected: usize,
        food: usize,
        service: usize,
    },

    #[error("{dimension} score {value} at position {index} is outside 1..=5")]
    ScoreOutOfRange {
        dimension: Dimension,
        index: usize,
        value: i64,
    },
}

/// Food and service rating of one review, both in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub food: u8,
    pub service: u8,
}

/// Final rating of one restaurant on the 0..10 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateScore {
    pub restaurant_name: String,
    pub value: f64,
}

/// Check the preconditions of [`calculate_overall_score`].
///
/// Order: emptiness, then lengths, then ranges (food list first).
pub fn validate_scores(food_scores: &[i64], service_scores: &[i64]) -> Result<(), ScoreError> {
    if food_scores.is_empty() || service_scores.is_empty() {
        return Err(ScoreError::EmptyScoreList);
    }
    if food_scores.len() != service_scores.len() {
        return Err(ScoreError::ScoreListLengthMismatch {
            expected: food_scores.len(),
            food: food_scores.len(),
            service: service_scores.len(),
        });
    }

    let tagged = food_scores
        .iter()
        .enumerate()
        .map(|(i, v)| (Dimension::Food, i, *v))
        .chain(
            service_scores
                .iter()
                .enumerate()
                .map(|(i, v)| (Dimension::Service, i, *v)),
        );
    for (dimension, index, value) in tagged {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(ScoreError::ScoreOutOfRange {
                dimension,
                index,
                value,
            });
        }
    }
    Ok(())
}

/// Validate and pair up the two rating lists.
pub fn score_pairs(food_scores: &[i64], service_scores: &[i64]) -> Result<Vec<ScorePair>, ScoreError> {
    validate_scores(food_scores, service_scores)?;
    Ok(food_scores
        .iter()
        .zip(service_scores)
        .map(|(&food, &service)| ScorePair {
            food: food as u8,
            service: service as u8,
        })
        .collect())
}

/// Compute the rounded 0..10 score for validated rating lists.
pub fn overall_score(food_scores: &[i64], service_scores: &[i64]) -> Result<f64, ScoreError> {
    validate_scores(food_scores, service_scores)?;

    let total: f64 = food_scores
        .iter()
        .zip(service_scores)
        .map(|(&food, &service)| ((food * food * service) as f64).sqrt())
        .sum();
    let denominator = food_scores.len() as f64 * 125.0_f64.sqrt();
    let score = total / denominator * 10.0;

    Ok(round3(score + ROUNDING_EPSILON))
}

/// Score a restaurant: `{restaurant_name: score}`.
///
/// # Examples
/// ```
/// use pipeline::calculate_overall_score;
///
/// let result = calculate_overall_score("X", &[5], &[5]).unwrap();
/// assert_eq!(result["X"], 10.0);
/// ```
pub fn calculate_overall_score(
    restaurant_name: &str,
    food_scores: &[i64],
    service_scores: &[i64],
) -> Result<BTreeMap<String, f64>, ScoreError> {
    let score = overall_score(food_scores, service_scores)?;
    Ok(BTreeMap::from([(restaurant_name.to_string(), score)]))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
