//! The three worker-backed stages.
//!
//! Each stage is a unit struct implementing [`crate::Stage`]:
//! - [`FetchStage`]: restaurant name -> reviews, via `fetch_restaurant_data`
//! - [`AnalysisStage`]: reviews -> per-review food/service scores, no tools
//! - [`ScoreStage`]: scores -> aggregate, via `calculate_overall_score`

pub mod analysis;
pub mod fetch;
pub mod score;

pub use analysis::{AnalysisOutput, AnalysisStage};
pub use fetch::{FetchOutput, FetchStage};
pub use score::ScoreStage;
