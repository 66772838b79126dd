//! Configuration for the assistant client.

use std::env;
use std::time::Duration;

use crate::error::AssistantError;

/// Fixed connect/read timeout applied to every request. The client never
/// retries; a timeout surfaces as a network error.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// System prompt attached to every chat-completion request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a business messaging assistant embedded in a chat application.

Keep responses SHORT and CONCISE: 2-3 sentences for simple questions, at \
most 5-6 bullet points for complex topics. Be direct and actionable. \
Recommend relevant app features (automated messages, catalogs, labels, \
quick replies) only when they fit the question. For questions unrelated to \
the business features, answer naturally and briefly.";

/// Configuration for [`crate::AssistantClient`].
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name.
    pub model: String,

    /// System prompt sent with every request.
    pub system_prompt: String,

    /// Maximum tokens for the response.
    pub max_tokens: u32,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: f32,

    /// Nucleus sampling cutoff.
    pub top_p: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.llama.com".to_string(),
            api_key: String::new(),
            model: "Llama-3.3-70B-Instruct".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

impl AssistantConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ASSISTANT_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `ASSISTANT_API_URL` - API base URL (default: https://api.llama.com)
    /// - `ASSISTANT_MODEL` - Model name (default: Llama-3.3-70B-Instruct)
    /// - `ASSISTANT_SYSTEM_PROMPT` - Overrides the built-in system prompt
    /// - `ASSISTANT_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `ASSISTANT_TEMPERATURE` - Temperature (default: 0.7)
    /// - `ASSISTANT_TOP_P` - Top-p (default: 0.9)
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = env::var("ASSISTANT_API_KEY")
            .map_err(|_| AssistantError::Configuration("ASSISTANT_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        Ok(Self {
            api_url: env::var("ASSISTANT_API_URL").unwrap_or(defaults.api_url),
            api_key,
            model: env::var("ASSISTANT_MODEL").unwrap_or(defaults.model),
            system_prompt: env::var("ASSISTANT_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt),
            max_tokens: env::var("ASSISTANT_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: env::var("ASSISTANT_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.temperature),
            top_p: env::var("ASSISTANT_TOP_P")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.top_p),
        })
    }

    /// Create a new configuration with the required fields.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the max tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = AssistantConfig::new("test-key")
            .with_api_url("https://example.test")
            .with_model("tiny-model")
            .with_max_tokens(128)
            .with_temperature(0.1);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.api_url, "https://example.test");
        assert_eq!(config.model, "tiny-model");
        assert_eq!(config.max_tokens, 128);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }
}
