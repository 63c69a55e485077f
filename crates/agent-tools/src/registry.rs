//! Tool registry for managing available tools

use crate::Tool;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Registry for managing tools
///
/// Tools are keyed by name; iteration order is alphabetical so the tool
/// list sent to the LLM is stable between runs.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding exactly the given tools
    pub fn from_tools<I>(tools: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        debug!(tool = %name, "Registering tool");
        self.tools
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// List all registered tools
    ///
    /// Used to build the tool definitions sent to the LLM.
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Names of all registered tools
    pub fn names(&self) -> Vec<String> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockTool;
    use serde_json::json;

    fn named_tool(name: &'static str) -> Arc<dyn Tool> {
        let mut tool = MockTool::new();
        tool.expect_name().return_const(name.to_string());
        tool.expect_description()
            .return_const("test tool".to_string());
        tool.expect_input_schema()
            .returning(|| json!({"type": "object"}));
        tool.expect_execute()
            .returning(move |_| Ok(json!({ "tool": name })));
        Arc::new(tool)
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("market_sentiment").is_none());
    }

    #[test]
    fn test_from_tools_sorted() {
        let registry = ToolRegistry::from_tools(vec![
            named_tool("portfolio_exposure"),
            named_tool("earnings_surprises"),
            named_tool("market_sentiment"),
        ]);

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.names(),
            vec!["earnings_surprises", "market_sentiment", "portfolio_exposure"]
        );
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = ToolRegistry::new();
        registry.register(named_tool("portfolio_exposure"));
        registry.register(named_tool("portfolio_exposure"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_get_and_execute() {
        let registry = ToolRegistry::from_tools(vec![named_tool("earnings_surprises")]);
        let tool = registry.get("earnings_surprises").unwrap();
        let output = tool.execute(json!({})).await.unwrap();
        assert_eq!(output["tool"], "earnings_surprises");
    }
}
