//! Errors raised at the worker boundary.

use thiserror::Error;

/// Errors that can occur when configuring or invoking a worker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid worker configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to connect to worker service: {0}")]
    ConnectionError(String),

    #[error("Worker invocation failed: {0}")]
    InvocationError(String),

    #[error("Invalid response from worker: {0}")]
    InvalidResponse(String),
}

/// Errors returned by a [`crate::ToolHost`] capability.
///
/// These never abort a worker call; they are reported back to the worker
/// as an error result so it can answer accordingly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Tool {tool} failed: {reason}")]
    Failed { tool: String, reason: String },
}
