//! Worker client: the boundary between the pipeline and language-model workers.
//!
//! This crate provides:
//! - the [`Worker`] trait every stage delegates to
//! - the [`ToolHost`] trait through which workers reach local capabilities
//! - [`GrpcWorker`], a client for a worker service speaking `proto/worker.proto`
//! - [`WorkerConfig`], validated eagerly so a missing credential fails at startup

pub mod config;
pub mod error;
pub mod grpc;
pub mod traits;

// Include the generated protobuf code
pub mod proto {
    tonic::include_proto!("worker");
}

pub use config::WorkerConfig;
pub use error::{ToolError, WorkerError};
pub use grpc::GrpcWorker;
pub use traits::{NoTools, ToolDescriptor, ToolHost, Worker, WorkerRequest};
