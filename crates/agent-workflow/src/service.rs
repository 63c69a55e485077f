//! Text-generation service seam
//!
//! The crew never talks to a language model directly. It asks a
//! `TextGenerationService` whether credentials are present and for one
//! agent per role.

use crate::prompt::render_role_prompt;
use crate::{Result, RoleSpec, WorkflowError};
use agent_core::Agent;
use agent_runtime::AgentRuntime;
use agent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::debug;

/// Source of role-playing agents
#[cfg_attr(test, mockall::automock)]
pub trait TextGenerationService: Send + Sync {
    /// Whether the service can be used at all
    fn is_configured(&self) -> bool;

    /// Create the agent that plays `role`, bound to exactly the role's tools
    fn assign_role(&self, role: &RoleSpec) -> Result<Arc<dyn Agent>>;
}

impl TextGenerationService for AgentRuntime {
    fn is_configured(&self) -> bool {
        AgentRuntime::is_configured(self)
    }

    fn assign_role(&self, role: &RoleSpec) -> Result<Arc<dyn Agent>> {
        let system_prompt = render_role_prompt(role).map_err(|e| WorkflowError::RoleAssignment {
            role: role.name.clone(),
            reason: e.to_string(),
        })?;

        debug!(role = %role.name, tools = ?role.tool_names(), "Assigning role");

        if role.has_tools() {
            let registry = ToolRegistry::from_tools(role.tools.iter().cloned());
            let agent = self.create_tool_agent(
                self.config().executor_config(system_prompt),
                Arc::new(registry),
                role.name.clone(),
            );
            Ok(Arc::new(agent))
        } else {
            let agent =
                self.create_simple_agent(self.config().simple_config(system_prompt), &role.name);
            Ok(Arc::new(agent))
        }
    }
}
