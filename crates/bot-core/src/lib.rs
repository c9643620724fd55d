//! Platform-agnostic core for the flagmate chat bot.
//!
//! This crate provides:
//! - Bounded per-user conversation history
//! - Session manager (per-user state with per-user serialization)
//! - Intent classification and the message router
//! - The `ChatTransport` seam platform binaries implement
//!
//! Platform-specific glue (the Telegram binary) builds on these primitives.

pub mod error;
pub mod history;
pub mod manager;
pub mod router;

pub use error::{BotError, BotResult};
pub use history::{ConversationHistory, HISTORY_LIMIT};
pub use manager::{SessionManager, UserSession};
pub use router::{
    classify, ChatTransport, Intent, MessageRouter, CLEAR_BUTTON, CTF_BUTTON, MESSAGE_CHAR_LIMIT,
    TRAINING_BUTTON,
};
