//! LLM — multi-provider adapter for upstream text generation.
//!
//! DESIGN
//! ======
//! Environment-configured. The `LlmClient` enum dispatches to the Anthropic
//! Messages API or any OpenAI-compatible endpoint (OpenAI, Groq, NVIDIA,
//! Cerebras, custom base URL) based on `LLM_PROVIDER`. The rest of the
//! crate only sees the [`LlmChat`] trait.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::{ChatResponse, ContentPart, LlmChat, LlmError, Message};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to a provider implementation.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    Anthropic(anthropic::AnthropicClient),
    OpenAiCompatible(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables (see
    /// [`LlmConfig::from_env`] for the variable list).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = if config.provider == LlmProviderKind::Anthropic {
            LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
        } else {
            let base_url = config
                .base_url
                .ok_or_else(|| LlmError::ConfigParse("missing base URL for OpenAI-compatible provider".into()))?;
            LlmProvider::OpenAiCompatible(openai::OpenAiClient::new(config.api_key, base_url, config.timeouts)?)
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        match &self.inner {
            LlmProvider::Anthropic(c) => c.chat(&self.model, max_tokens, system, messages).await,
            LlmProvider::OpenAiCompatible(c) => c.chat(&self.model, max_tokens, system, messages).await,
        }
    }
}
