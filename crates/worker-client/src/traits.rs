//! The contract every pipeline stage relies on.
//!
//! A [`Worker`] takes an instruction plus structured context and answers
//! with free text. Everything non-deterministic lives behind this trait, so
//! the rest of the pipeline can be tested with a stub implementation.

use crate::error::{ToolError, WorkerError};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Description of a capability a worker may ask the caller to run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: Value,
}

/// One request to a worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerRequest {
    /// Logical agent name, e.g. `review_analysis_agent`
    pub agent: String,
    pub system_message: String,
    pub instruction: String,
    pub context: Value,
    /// Tools this request may call; anything else is refused
    pub tools: Vec<ToolDescriptor>,
}

impl WorkerRequest {
    pub fn allows_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name == name)
    }
}

/// Capabilities the caller executes on a worker's behalf.
pub trait ToolHost: Send + Sync {
    fn call(&self, name: &str, arguments: &Value) -> Result<Value, ToolError>;
}

/// An opaque natural-language worker.
///
/// ## Design Note
/// - Implementations must be reentrant; concurrent pipeline runs may share one
/// - The returned text is free-form; callers extract JSON from it themselves
#[async_trait]
pub trait Worker: Send + Sync {
    async fn invoke(
        &self,
        request: &WorkerRequest,
        tools: &dyn ToolHost,
    ) -> Result<String, WorkerError>;
}

/// A [`ToolHost`] with no capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTools;

impl ToolHost for NoTools {
    fn call(&self, name: &str, _arguments: &Value) -> Result<Value, ToolError> {
        Err(ToolError::UnknownTool(name.to_string()))
    }
}
