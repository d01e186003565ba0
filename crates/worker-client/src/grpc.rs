//! gRPC-backed worker.
//!
//! Runs the turn loop against a `LanguageWorker` service: each response
//! either carries the final text or a batch of tool calls. Tool calls are
//! executed locally through the caller's [`ToolHost`] and their results are
//! sent back on the next turn.

use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::proto::{self, language_worker_client::LanguageWorkerClient, InvokeRequest};
use crate::traits::{ToolHost, Worker, WorkerRequest};
use async_trait::async_trait;
use serde_json::{json, Value};
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::Channel;
use tracing::{debug, error, info, warn};

/// Client for a remote language-model worker.
///
/// Cheap to clone; clones share the underlying channel.
#[derive(Clone)]
pub struct GrpcWorker {
    client: LanguageWorkerClient<Channel>,
    config: WorkerConfig,
    authorization: MetadataValue<Ascii>,
}

impl GrpcWorker {
    /// Validate `config` and connect to the worker service.
    pub async fn connect(config: WorkerConfig) -> Result<Self, WorkerError> {
        config.validate()?;

        let authorization: MetadataValue<Ascii> = format!("Bearer {}", config.api_key)
            .parse()
            .map_err(|_| {
                WorkerError::InvalidConfig("API key is not valid header text".to_string())
            })?;

        info!("Connecting to worker service at {}", config.endpoint);
        let channel = Channel::from_shared(config.endpoint.clone())
            .map_err(|e| WorkerError::InvalidConfig(format!("bad endpoint: {}", e)))?
            .connect()
            .await
            .map_err(|e| {
                error!("Could not reach worker service at {}: {}", config.endpoint, e);
                WorkerError::ConnectionError(e.to_string())
            })?;

        Ok(Self {
            client: LanguageWorkerClient::new(channel),
            config,
            authorization,
        })
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Get the address of the worker service this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl Worker for GrpcWorker {
    async fn invoke(
        &self,
        request: &WorkerRequest,
        tools: &dyn ToolHost,
    ) -> Result<String, WorkerError> {
        let mut client = self.client.clone();
        let descriptors: Vec<proto::ToolDescriptor> = request
            .tools
            .iter()
            .map(|tool| proto::ToolDescriptor {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters_json: tool.parameters.to_string(),
            })
            .collect();
        let context_json = request.context.to_string();

        let mut history_calls: Vec<proto::ToolCall> = Vec::new();
        let mut history_results: Vec<proto::ToolResult> = Vec::new();

        for turn in 1..=self.config.max_turns {
            let mut rpc = tonic::Request::new(InvokeRequest {
                model: self.config.model.clone(),
                agent: request.agent.clone(),
                system_message: request.system_message.clone(),
                instruction: request.instruction.clone(),
                context_json: context_json.clone(),
                tools: descriptors.clone(),
                tool_calls: history_calls.clone(),
                tool_results: history_results.clone(),
            });
            rpc.metadata_mut()
                .insert("authorization", self.authorization.clone());

            debug!("Invoking {} (turn {}/{})", request.agent, turn, self.config.max_turns);
            let response = client
                .invoke(rpc)
                .await
                .map_err(|status| {
                    error!("gRPC error while invoking {}: {}", request.agent, status);
                    WorkerError::InvocationError(status.message().to_string())
                })?
                .into_inner();

            if response.tool_calls.is_empty() {
                return Ok(response.text);
            }

            let mut last_output = String::new();
            for call in response.tool_calls {
                let result = run_tool(request, tools, &call);
                last_output = result.output_json.clone();
                history_results.push(result);
                history_calls.push(call);
            }

            if turn == self.config.max_turns {
                // Out of turns right after a tool round: the tool output is the answer.
                debug!("{} used all turns; returning last tool output", request.agent);
                return Ok(last_output);
            }
        }

        Err(WorkerError::InvalidResponse(format!(
            "{} produced no answer",
            request.agent
        )))
    }
}

/// Execute one tool call, turning every failure into an error result.
fn run_tool(request: &WorkerRequest, tools: &dyn ToolHost, call: &proto::ToolCall) -> proto::ToolResult {
    let outcome = if !request.allows_tool(&call.name) {
        warn!("{} requested tool '{}' it was not offered", request.agent, call.name);
        Err(format!("tool '{}' is not available to {}", call.name, request.agent))
    } else {
        parse_arguments(&call.arguments_json).and_then(|arguments| {
            tools
                .call(&call.name, &arguments)
                .map_err(|e| e.to_string())
        })
    };

    let (output_json, is_error) = match outcome {
        Ok(value) => (value.to_string(), false),
        Err(message) => (json!({ "error": message }).to_string(), true),
    };

    proto::ToolResult {
        call_id: call.id.clone(),
        name: call.name.clone(),
        output_json,
        is_error,
    }
}

fn parse_arguments(raw: &str) -> Result<Value, String> {
    if raw.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(raw).map_err(|e| format!("arguments are not valid JSON: {}", e))
}
