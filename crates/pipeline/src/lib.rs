//! Review-to-score pipeline building blocks.
//!
//! This crate provides:
//! - [`calculate_overall_score`], the deterministic score calculator
//! - [`extract_json`] for pulling a JSON object out of worker prose
//! - the [`Stage`] trait and the fetch / analysis / score stages
//! - [`StageRunner`], which invokes a stage against a worker
//! - [`PipelineTools`], the capabilities workers may call
//!
//! ## Architecture
//! A run moves through three worker-backed stages:
//! 1. Fetch: the worker calls `fetch_restaurant_data` and relays the reviews
//! 2. Analysis: the worker rates every review against the fixed lexicon
//! 3. Score: the worker calls `calculate_overall_score` and relays the result
//!
//! Sequencing and validation between stages belong to the `orchestrator` crate.

pub mod extract;
pub mod lexicon;
pub mod scoring;
pub mod stage_runner;
pub mod stages;
pub mod tools;
pub mod traits;

// Re-export main types
pub use extract::{extract_json, ExtractError};
pub use scoring::{
    calculate_overall_score, overall_score, score_pairs, validate_scores, AggregateScore,
    Dimension, ScoreError, ScorePair,
};
pub use stage_runner::{StageFailure, StageRunner};
pub use stages::{AnalysisOutput, AnalysisStage, FetchOutput, FetchStage, ScoreStage};
pub use tools::{PipelineTools, FETCH_TOOL, SCORE_TOOL};
pub use traits::{Stage, StageKind};
