//! Error types for crew execution

use thiserror::Error;

/// Result type for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Errors that end a pipeline run
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The text-generation service has no usable credentials
    #[error("text generation service is not configured")]
    NotConfigured,

    /// The crew has no steps
    #[error("crew has no steps")]
    EmptyCrew,

    /// An agent could not be created for a role
    #[error("could not assign role '{role}': {reason}")]
    RoleAssignment { role: String, reason: String },

    /// A stage failed while running
    #[error("stage {stage} ({role}) failed: {reason}")]
    StageFailed {
        stage: usize,
        role: String,
        reason: String,
    },

    /// A prompt template failed to render
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl From<WorkflowError> for agent_core::Error {
    fn from(err: WorkflowError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failure_message() {
        let err = WorkflowError::StageFailed {
            stage: 1,
            role: "Market Analyst".to_string(),
            reason: "LLM request failed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "stage 1 (Market Analyst) failed: LLM request failed"
        );

        let core: agent_core::Error = err.into();
        assert!(core.to_string().contains("Market Analyst"));
    }
}
