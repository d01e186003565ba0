//! Pipeline run states.
//!
//! `Resolving -> Fetching -> Analyzing -> Scoring -> Done`, with `Failed`
//! reachable from every non-terminal state.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Resolving,
    Fetching,
    Analyzing,
    Scoring,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// The state a successful step moves to
    pub fn next(&self) -> PipelineState {
        match self {
            PipelineState::Resolving => PipelineState::Fetching,
            PipelineState::Fetching => PipelineState::Analyzing,
            PipelineState::Analyzing => PipelineState::Scoring,
            PipelineState::Scoring => PipelineState::Done,
            PipelineState::Done => PipelineState::Done,
            PipelineState::Failed => PipelineState::Failed,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineState::Resolving => "resolving",
            PipelineState::Fetching => "fetching",
            PipelineState::Analyzing => "analyzing",
            PipelineState::Scoring => "scoring",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_order() {
        let mut state = PipelineState::Resolving;
        let mut seen = vec![state];
        while !state.is_terminal() {
            state = state.next();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                PipelineState::Resolving,
                PipelineState::Fetching,
                PipelineState::Analyzing,
                PipelineState::Scoring,
                PipelineState::Done,
            ]
        );
    }

    #[test]
    fn test_terminal_states_stay_put() {
        assert_eq!(PipelineState::Failed.next(), PipelineState::Failed);
        assert_eq!(PipelineState::Done.next(), PipelineState::Done);
    }
}
