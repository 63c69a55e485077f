//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// Implementations give access to a text-generation service. The pipeline
/// asks `is_configured` before starting a run so that a missing credential
/// is reported up front instead of failing halfway through.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion from the LLM
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;

    /// Whether the provider holds the credentials it needs
    fn is_configured(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, StopReason, TokenUsage};

    #[tokio::test]
    async fn test_mock_provider_completes() {
        let mut provider = MockLLMProvider::new();
        provider.expect_is_configured().return_const(true);
        provider.expect_complete().returning(|request| {
            Ok(CompletionResponse {
                message: Message::assistant(format!("model={}", request.model)),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        });

        assert!(provider.is_configured());
        let response = provider
            .complete(CompletionRequest::builder("gpt-4o-mini").build())
            .await
            .unwrap();
        assert_eq!(response.message.text().as_deref(), Some("model=gpt-4o-mini"));
    }
}
