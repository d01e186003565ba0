//! Worker connection settings.

use crate::error::WorkerError;
use std::fmt;

/// Settings for reaching a language-model worker service.
///
/// Validated eagerly: a missing API key fails at construction time rather
/// than on the first stage call.
#[derive(Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// gRPC address of the worker service, e.g. `http://localhost:50051`
    pub endpoint: String,
    /// Model the worker should run
    pub model: String,
    /// Credential forwarded to the worker as bearer metadata
    pub api_key: String,
    /// Upper bound on request/response turns per stage call
    pub max_turns: usize,
}

impl WorkerConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:50051";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_MAX_TURNS: usize = 2;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Check required fields.
    pub fn validate(&self) -> Result<(), WorkerError> {
        if self.api_key.trim().is_empty() {
            return Err(WorkerError::MissingCredential(
                "worker API key is empty (set OPENAI_API_KEY)".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(WorkerError::InvalidConfig("model name is empty".to_string()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(WorkerError::InvalidConfig("endpoint is empty".to_string()));
        }
        if self.max_turns == 0 {
            return Err(WorkerError::InvalidConfig(
                "max_turns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for WorkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("max_turns", &self.max_turns)
            .finish()
    }
}
