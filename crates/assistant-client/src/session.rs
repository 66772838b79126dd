//! In-memory transcript of one assistant conversation.

use crate::api_types::ChatMessage;

/// Default number of turns (user + assistant pairs) kept in the transcript.
const DEFAULT_MAX_TURNS: usize = 10;

/// Rolling transcript for one assistant chat.
///
/// Holds the user/assistant turns the client replays as "full prior
/// history" on each request, trimmed to the newest `max_turns` pairs. The
/// system prompt is not stored here; the client attaches it per request.
#[derive(Debug, Clone)]
pub struct AssistantSession {
    messages: Vec<ChatMessage>,
    max_turns: usize,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

impl AssistantSession {
    /// Create a session keeping at most `max_turns` exchanges.
    pub fn new(max_turns: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_turns,
        }
    }

    /// The transcript in chronological order.
    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Record one completed exchange, trimming the oldest turns beyond the
    /// limit.
    pub fn push_exchange(&mut self, user_text: &str, assistant_text: &str) {
        self.messages.push(ChatMessage::user(user_text));
        self.messages.push(ChatMessage::assistant(assistant_text));

        let max_messages = self.max_turns * 2;
        if self.messages.len() > max_messages {
            let excess = self.messages.len() - max_messages;
            self.messages.drain(0..excess);
        }
    }

    /// Drop the transcript.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
