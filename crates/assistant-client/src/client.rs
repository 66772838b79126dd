//! The chat-completion client.

use reqwest::Client;
use tracing::{debug, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::{AssistantConfig, REQUEST_TIMEOUT};
use crate::error::{AssistantError, Result};

/// Thin client for the hosted assistant API.
///
/// One operation: [`AssistantClient::complete_chat`], which sends the fixed
/// system prompt, the full prior turn history, and the new user message,
/// and returns the assistant's reply. No retry, no streaming.
pub struct AssistantClient {
    client: Client,
    config: AssistantConfig,
}

impl AssistantClient {
    /// Create a client with the given configuration.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                AssistantError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`AssistantConfig::from_env`] for the variable list.
    pub fn from_env() -> Result<Self> {
        Self::new(AssistantConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Send the conversation so far plus one new user message; return the
    /// assistant's reply text.
    ///
    /// `history` holds prior user/assistant turns in order. The system
    /// prompt is attached here on every call, so callers never include it.
    pub async fn complete_chat(&self, history: &[ChatMessage], user_text: &str) -> Result<String> {
        let messages = build_messages(&self.config.system_prompt, history, user_text);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        let url = format!("{}/v1/chat/completions", self.config.api_url);
        debug!(model = %request.model, turns = request.messages.len(), "sending chat completion");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Network(format!("failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "assistant API returned an error");

            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.message,
                Err(_) => error_text,
            };
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Network(format!("failed to parse response: {e}")))?;

        if let Some(usage) = &completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "token usage"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(AssistantError::EmptyResponse)
    }
}

/// Assemble the request message list: system prompt, prior turns, new user
/// message, in that order.
fn build_messages(
    system_prompt: &str,
    history: &[ChatMessage],
    user_text: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(user_text));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_ordered_system_history_user() {
        let history = vec![
            ChatMessage::user("first question"),
            ChatMessage::assistant("first answer"),
        ];

        let messages = build_messages("be brief", &history, "follow-up");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "be brief");
        assert_eq!(messages[1].content, "first question");
        assert_eq!(messages[2].content, "first answer");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "follow-up");
    }

    #[test]
    fn empty_history_still_carries_the_system_prompt() {
        let messages = build_messages("be brief", &[], "hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }
}
