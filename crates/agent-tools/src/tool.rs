//! Tool trait definition

use agent_core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Tools are functions that LLM agents can call. Each tool provides a name,
/// a description and a JSON schema for its input.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// `params` should match `input_schema`; the returned value is handed
    /// back to the LLM as JSON text.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry and match the name in ToolDefinition
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Schema for a tool that takes an optional ticker filter:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "symbols": { "type": "array", "items": { "type": "string" } }
    ///     },
    ///     "required": []
    /// });
    /// assert_eq!(schema["type"], "object");
    /// ```
    fn input_schema(&self) -> Value;
}
