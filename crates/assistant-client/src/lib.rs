//! HTTP client for the hosted assistant chat-completion API.
//!
//! One operation: send an ordered list of role-tagged messages and get the
//! assistant's reply or a failure reason. A fixed system prompt is attached
//! to every request; the full prior turn history travels with each new user
//! message. Requests carry a 30 second timeout and are never retried.
//!
//! # Example
//!
//! ```no_run
//! use assistant_client::{AssistantClient, AssistantSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AssistantClient::from_env()?;
//!     let mut session = AssistantSession::default();
//!
//!     let reply = client.complete_chat(session.history(), "How do I set up quick replies?").await?;
//!     session.push_exchange("How do I set up quick replies?", &reply);
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod api_types;
pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, Usage,
};
pub use client::AssistantClient;
pub use config::{AssistantConfig, DEFAULT_SYSTEM_PROMPT, REQUEST_TIMEOUT};
pub use error::{AssistantError, Result};
pub use session::AssistantSession;
