//! Simple agent implementation (LLM only, no tools)

use crate::executor::DEFAULT_MODEL;
use agent_core::{Agent, Context, Error, Result};
use agent_llm::{CompletionRequest, LLMProvider, Message};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Configuration for a simple agent
#[derive(Debug, Clone)]
pub struct SimpleConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// A simple agent that uses the LLM without tools
///
/// One request, one answer. An agent built this way has no way to reach
/// data sources; whatever it needs must already be in its input.
pub struct SimpleAgent {
    provider: Arc<dyn LLMProvider>,
    config: SimpleConfig,
    name: String,
}

impl SimpleAgent {
    /// Create a new simple agent
    pub fn new(provider: Arc<dyn LLMProvider>, config: SimpleConfig, name: String) -> Self {
        Self {
            provider,
            config,
            name,
        }
    }

    /// Get the agent's configuration
    pub fn config(&self) -> &SimpleConfig {
        &self.config
    }
}

#[async_trait]
impl Agent for SimpleAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        debug!(agent = %self.name, stage = ?context.stage(), "Simple completion");

        let request = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(input)])
            .system(self.config.system_prompt.clone())
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::ProcessingFailed(format!("LLM request failed: {e}")))?;

        Ok(response.message.text().unwrap_or_default())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedProvider, text};

    #[test]
    fn test_simple_config_default() {
        let config = SimpleConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 4096);
    }

    #[tokio::test]
    async fn test_simple_agent_sends_no_tools() {
        let provider = Arc::new(ScriptedProvider::new(vec![text("Markets were mixed.")]));
        let agent = SimpleAgent::new(
            provider.clone(),
            SimpleConfig {
                system_prompt: "You write briefs".to_string(),
                ..SimpleConfig::default()
            },
            "Report Writer".to_string(),
        );

        let mut ctx = Context::new();
        let output = agent.process("write".to_string(), &mut ctx).await.unwrap();
        assert_eq!(output, "Markets were mixed.");
        assert_eq!(agent.name(), "Report Writer");

        let requests = provider.requests.lock().unwrap();
        assert!(requests[0].tools.is_none());
        assert_eq!(requests[0].system.as_deref(), Some("You write briefs"));
    }
}
