//! Role definitions

use agent_tools::Tool;
use std::fmt;
use std::sync::Arc;

/// A named persona with a goal and the capabilities it may use
///
/// Tools are granted per role. A role without tools gets an agent that can
/// only write from the context it is handed.
#[derive(Clone)]
pub struct RoleSpec {
    pub name: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<Arc<dyn Tool>>,
}

impl RoleSpec {
    pub fn new(
        name: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
        }
    }

    /// Grant one tool
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Grant several tools
    pub fn with_tools<I>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        self.tools.extend(tools);
        self
    }

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

impl fmt::Debug for RoleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleSpec")
            .field("name", &self.name)
            .field("goal", &self.goal)
            .field("tools", &self.tool_names())
            .finish_non_exhaustive()
    }
}
