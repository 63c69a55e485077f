//! Agent runtime for executing agents with dependency injection
//!
//! This crate provides the runtime infrastructure for executing agents:
//! the `AgentExecutor` tool loop, the `AgentRuntime` that owns the
//! process-scoped LLM provider, and the concrete agent implementations.

pub mod agents;
pub mod executor;
pub mod runtime;

// Re-export key types
pub use agents::{SimpleAgent, SimpleConfig, ToolAgent};
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig};
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, RuntimeConfig};

#[cfg(test)]
pub(crate) mod testing;
