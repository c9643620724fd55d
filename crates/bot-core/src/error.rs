//! Error types for bot operations.

use thiserror::Error;

/// Result type for bot operations.
pub type BotResult<T> = Result<T, BotError>;

/// Errors that can occur while handling an inbound chat event.
#[derive(Debug, Error)]
pub enum BotError {
    /// The chat transport rejected a send.
    #[error("failed to send message: {0}")]
    SendFailed(String),
}
