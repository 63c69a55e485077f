//! Runtime holding the process-scoped LLM provider
//!
//! The AgentRuntime is built once in `main` and injected wherever agents
//! are created. It owns no per-run state.

use agent_core::Result;
use agent_llm::LLMProvider;
use agent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::debug;

use crate::agents::{SimpleAgent, SimpleConfig, ToolAgent};
use crate::executor::{AgentExecutor, DEFAULT_MODEL, ExecutorConfig};

/// Configuration for the agent runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Default maximum iterations for tool-using agents
    pub default_max_iterations: usize,

    /// Default model to use
    pub default_model: String,

    /// Default max tokens per completion
    pub default_max_tokens: usize,

    /// Default sampling temperature
    pub default_temperature: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: 10,
            default_model: DEFAULT_MODEL.to_string(),
            default_max_tokens: 4096,
            default_temperature: 0.7,
        }
    }
}

impl RuntimeConfig {
    /// Executor settings derived from the runtime defaults
    pub fn executor_config(&self, system_prompt: impl Into<String>) -> ExecutorConfig {
        ExecutorConfig {
            max_iterations: self.default_max_iterations,
            model: self.default_model.clone(),
            system_prompt: Some(system_prompt.into()),
            max_tokens: self.default_max_tokens,
            temperature: Some(self.default_temperature),
        }
    }

    /// Simple-agent settings derived from the runtime defaults
    pub fn simple_config(&self, system_prompt: impl Into<String>) -> SimpleConfig {
        SimpleConfig {
            model: self.default_model.clone(),
            system_prompt: system_prompt.into(),
            max_tokens: self.default_max_tokens,
            temperature: self.default_temperature,
        }
    }
}

/// Runtime for creating agents with dependency injection
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, SimpleConfig};
/// use agent_llm::LLMProvider;
/// use std::sync::Arc;
///
/// # fn example(provider: Arc<dyn LLMProvider>) -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder()
///     .provider(provider)
///     .default_model("gpt-4o-mini")
///     .build()?;
///
/// let writer = runtime.create_simple_agent(SimpleConfig::default(), "writer");
/// # Ok(())
/// # }
/// ```
pub struct AgentRuntime {
    provider: Arc<dyn LLMProvider>,
    config: RuntimeConfig,
}

impl AgentRuntime {
    /// Create a new agent runtime
    pub fn new(provider: Arc<dyn LLMProvider>, config: RuntimeConfig) -> Self {
        Self { provider, config }
    }

    /// Create a new runtime builder
    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::new()
    }

    /// Get a reference to the LLM provider
    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Get a reference to the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Whether the provider holds usable credentials
    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Create a simple agent (LLM only, no tools)
    pub fn create_simple_agent(
        &self,
        config: SimpleConfig,
        name: impl Into<String>,
    ) -> SimpleAgent {
        SimpleAgent::new(self.provider.clone(), config, name.into())
    }

    /// Create a tool-using agent limited to the given registry
    pub fn create_tool_agent(
        &self,
        config: ExecutorConfig,
        tools: Arc<ToolRegistry>,
        name: impl Into<String>,
    ) -> ToolAgent {
        let name = name.into();
        debug!(agent = %name, tools = ?tools.names(), "Creating tool agent");
        let executor = AgentExecutor::new(self.provider.clone(), tools, config);
        ToolAgent::new(executor, name)
    }
}

/// Builder for AgentRuntime
pub struct AgentRuntimeBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    config: RuntimeConfig,
}

impl AgentRuntimeBuilder {
    /// Create a new runtime builder
    pub fn new() -> Self {
        Self {
            provider: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default max iterations
    pub fn default_max_iterations(mut self, max: usize) -> Self {
        self.config.default_max_iterations = max;
        self
    }

    /// Set the default model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Set the default max tokens
    pub fn default_max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.default_max_tokens = max_tokens;
        self
    }

    /// Set the default temperature
    pub fn default_temperature(mut self, temperature: f32) -> Self {
        self.config.default_temperature = temperature;
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not set
    pub fn build(self) -> Result<AgentRuntime> {
        let provider = self.provider.ok_or_else(|| {
            agent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        Ok(AgentRuntime::new(provider, self.config))
    }
}

impl Default for AgentRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
