//! Orchestrator crate for the review-score pipeline.
//!
//! This crate owns the pipeline state machine: it resolves the restaurant
//! named in a user query, then drives the fetch, analysis and score stages
//! in order, stopping at the first failure.

pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::{PipelineError, Result};
pub use orchestrator::{OrchestratorConfig, PipelineResult, ReviewOrchestrator};
pub use state::PipelineState;
