//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Supported upstream providers. Everything except Anthropic speaks the
/// OpenAI-compatible chat-completions wire format at its own base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Anthropic,
    OpenAi,
    Groq,
    Nvidia,
    Cerebras,
    /// Any OpenAI-compatible endpoint; requires `LLM_BASE_URL`.
    Custom,
}

impl LlmProviderKind {
    /// `true` for providers using the OpenAI-compatible wire format.
    #[must_use]
    pub fn is_openai_compatible(self) -> bool {
        !matches!(self, Self::Anthropic)
    }

    /// Well-known API base URL, where the provider has one.
    #[must_use]
    pub fn base_url(self) -> Option<&'static str> {
        match self {
            Self::Anthropic | Self::Custom => None,
            Self::OpenAi => Some("https://api.openai.com/v1"),
            Self::Groq => Some("https://api.groq.com/openai/v1"),
            Self::Nvidia => Some("https://integrate.api.nvidia.com/v1"),
            Self::Cerebras => Some("https://api.cerebras.ai/v1"),
        }
    }

    /// Default model when `LLM_MODEL` is absent.
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5-20250929",
            Self::OpenAi | Self::Custom => "gpt-4o",
            Self::Groq => "meta-llama/llama-4-scout-17b-16e-instruct",
            Self::Nvidia => "meta/llama-4-scout-17b-16e-instruct",
            Self::Cerebras => "llama3.3-70b",
        }
    }
}

/// HTTP timeout settings for provider clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for LlmTimeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Typed LLM configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    /// Effective base URL for OpenAI-compatible providers.
    pub base_url: Option<String>,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Required:
    /// - `LLM_API_KEY_ENV` (names the env var containing the key)
    ///
    /// Optional:
    /// - `LLM_PROVIDER`: `anthropic` (default), `openai`, `groq`, `nvidia`,
    ///   `cerebras`, or `custom`
    /// - `LLM_MODEL`: provider default when absent
    /// - `LLM_BASE_URL`: required for `custom`, overrides the provider's
    ///   well-known URL otherwise
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] for an unknown provider, a missing API key,
    /// or a `custom` provider without a base URL.
    pub fn from_env() -> Result<Self, LlmError> {
        let provider = parse_provider(std::env::var("LLM_PROVIDER").ok().as_deref())?;

        let key_var =
            std::env::var("LLM_API_KEY_ENV").map_err(|_| LlmError::MissingApiKey { var: "LLM_API_KEY_ENV".into() })?;
        let api_key = std::env::var(&key_var).map_err(|_| LlmError::MissingApiKey { var: key_var.clone() })?;

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| provider.default_model().to_string());

        let base_url = std::env::var("LLM_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .or_else(|| provider.base_url().map(str::to_owned));
        if provider == LlmProviderKind::Custom && base_url.is_none() {
            return Err(LlmError::ConfigParse("custom provider requires LLM_BASE_URL".into()));
        }

        let timeouts = LlmTimeouts {
            request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { provider, api_key, model, base_url, timeouts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_provider(raw: Option<&str>) -> Result<LlmProviderKind, LlmError> {
    match raw.unwrap_or("anthropic") {
        "anthropic" => Ok(LlmProviderKind::Anthropic),
        "openai" => Ok(LlmProviderKind::OpenAi),
        "groq" => Ok(LlmProviderKind::Groq),
        "nvidia" => Ok(LlmProviderKind::Nvidia),
        "cerebras" => Ok(LlmProviderKind::Cerebras),
        "custom" => Ok(LlmProviderKind::Custom),
        other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
