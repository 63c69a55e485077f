//! Execution context for agents
//!
//! The `Context` struct is a key-value store scoped to a single pipeline
//! run. The crew writes the run id, the caller's query and the current
//! stage into it before each stage executes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Identifier of the pipeline run
    pub const RUN_ID: &str = "run_id";
    /// The caller's natural-language query
    pub const QUERY: &str = "query";
    /// Name of the stage currently executing
    pub const STAGE: &str = "stage";
    /// Output of the previous stage, when the current stage depends on it
    pub const PRIOR_OUTPUT: &str = "prior_output";
}

/// Context passed to agents during execution
///
/// # Example
///
/// ```
/// use agent_core::Context;
///
/// let ctx = Context::new()
///     .with_run_id("run-1")
///     .with_query("exposure check");
///
/// assert_eq!(ctx.run_id(), Some("run-1"));
/// assert_eq!(ctx.query(), Some("exposure check"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    // =========== Builder Methods ===========

    /// Set the run id
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.insert(keys::RUN_ID, serde_json::json!(run_id.into()));
        self
    }

    /// Set the caller's query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.insert(keys::QUERY, serde_json::json!(query.into()));
        self
    }

    // =========== Common Accessors ===========

    /// Get the run id
    pub fn run_id(&self) -> Option<&str> {
        self.get(keys::RUN_ID).and_then(|v| v.as_str())
    }

    /// Get the caller's query
    pub fn query(&self) -> Option<&str> {
        self.get(keys::QUERY).and_then(|v| v.as_str())
    }

    /// Get the current stage name
    pub fn stage(&self) -> Option<&str> {
        self.get(keys::STAGE).and_then(|v| v.as_str())
    }

    /// Record the stage about to execute
    pub fn set_stage(&mut self, stage: impl Into<String>) {
        self.insert(keys::STAGE, serde_json::json!(stage.into()));
    }

    /// Get the prior stage's output, if one was handed forward
    pub fn prior_output(&self) -> Option<&str> {
        self.get(keys::PRIOR_OUTPUT).and_then(|v| v.as_str())
    }

    /// Hand a stage output forward to the next stage
    pub fn set_prior_output(&mut self, output: impl Into<String>) {
        self.insert(keys::PRIOR_OUTPUT, serde_json::json!(output.into()));
    }

    // =========== Generic Key-Value Operations ===========

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Insert a typed value into the context
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a typed value from the context
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::ProcessingFailed(format!(
                        "Failed to deserialize context value: {e}"
                    ))
                })?;
                Ok(Some(typed))
            }
        }
    }

    /// Check if a key exists in the context
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Remove a value from the context
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Get the number of entries in the context
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
