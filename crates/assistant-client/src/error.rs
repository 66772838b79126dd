//! Assistant client error types.

use thiserror::Error;

/// Errors that can occur while talking to the assistant API.
///
/// Nothing here is retried; every failure surfaces to the caller, which
/// renders it as a user-visible error string.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Failed to reach the API (connect, timeout, transport).
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A success response that carried no assistant message.
    #[error("no completion in API response")]
    EmptyResponse,
}

/// Result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
