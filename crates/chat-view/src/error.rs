//! View-layer error types.

use thiserror::Error;

/// Errors that can occur while deriving view state.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Store(#[from] chat_store::StoreError),
}

/// Result type for view-state operations.
pub type Result<T> = std::result::Result<T, ViewError>;
