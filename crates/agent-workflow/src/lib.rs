//! Multi-agent orchestration for agent-rs
//!
//! A [`Crew`] is an ordered list of steps, each pairing a [`RoleSpec`]
//! with a [`TaskSpec`]. Steps run strictly in sequence; a step may take the
//! previous step's output as context. Agents for each role come from a
//! [`TextGenerationService`], which also gates the run on credentials.

pub mod crew;
pub mod error;
pub mod prompt;
pub mod role;
pub mod service;
pub mod task;

pub use crew::{Crew, CrewBuilder, CrewOutput, PipelineRun, RunState, StageOutput};
pub use error::{Result, WorkflowError};
pub use role::RoleSpec;
pub use service::TextGenerationService;
pub use task::{CrewStep, TaskSpec};

#[cfg(test)]
pub use service::MockTextGenerationService;
