//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// An agent that uses the LLM loop with tool execution
///
/// The agent can only call the tools in its executor's registry.
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        debug!(
            agent = %self.name,
            run_id = ?context.run_id(),
            tools = ?self.executor.tools().names(),
            "Tool agent started"
        );
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedProvider, text};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tool_agent_delegates_to_executor() {
        let provider = Arc::new(ScriptedProvider::new(vec![text("done")]));
        let executor = AgentExecutor::builder().provider(provider).build().unwrap();
        let agent = ToolAgent::new(executor, "Market Analyst");

        let mut ctx = Context::new().with_run_id("r1");
        assert_eq!(agent.process("go".to_string(), &mut ctx).await.unwrap(), "done");
        assert_eq!(agent.name(), "Market Analyst");
        assert!(agent.executor().tools().is_empty());
    }
}
