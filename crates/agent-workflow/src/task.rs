//! Task definitions and crew steps

use crate::RoleSpec;

/// Work assigned to one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub description: String,
    pub expected_output: String,
    /// Receive the previous stage's full output as context
    pub depends_on_prior: bool,
}

impl TaskSpec {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            depends_on_prior: false,
        }
    }

    /// Hand the previous stage's output to this task
    pub fn with_prior_context(mut self) -> Self {
        self.depends_on_prior = true;
        self
    }
}

/// One step of a crew: a role and its task
#[derive(Debug, Clone)]
pub struct CrewStep {
    pub role: RoleSpec,
    pub task: TaskSpec,
}

impl CrewStep {
    pub fn new(role: RoleSpec, task: TaskSpec) -> Self {
        Self { role, task }
    }
}
