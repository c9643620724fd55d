//! Routes inbound chat events to session state and the completion backend.
//!
//! Every update is first classified into an [`Intent`], then dispatched. Only
//! the free-text path talks to the model; everything else is local state or
//! canned replies.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use flagmate_agent::{compose_prompt, CompletionBackend, Mode, Role};

use crate::error::{BotError, BotResult};
use crate::manager::SessionManager;

/// Telegram rejects messages past this many characters; replies that fail to
/// send and exceed it are re-sent as consecutive chunks of this size.
pub const MESSAGE_CHAR_LIMIT: usize = 4000;

pub const TRAINING_BUTTON: &str = "🟢 Training";
pub const CTF_BUTTON: &str = "🔴 CTF mode";
pub const CLEAR_BUTTON: &str = "🧹 Clear memory";

pub const WELCOME_TEXT: &str = "CTF assistant ready. Pick a working mode.";
pub const HELP_TEXT: &str = "How to use this bot:\n\
    🟢 Training — detailed, plain-language explanations: what to check, how to exploit the vulnerability, example commands.\n\
    🔴 CTF mode — straight to a working solution, with specific clarifying questions when the task is ambiguous.\n\n\
    Send the task text as a message. /start reopens this menu, and the 'Clear memory' button wipes your conversation history.";
pub const MEMORY_CLEARED_TEXT: &str = "Memory cleared.";
pub const TRAINING_ENABLED_TEXT: &str = "Mode: TRAINING (detailed explanations).";
pub const CTF_ENABLED_TEXT: &str =
    "Mode: CTF (straight to the solution, clarifying questions when needed).";
pub const EMPTY_INPUT_TEXT: &str = "Send me a task description or a question.";
pub const THINKING_TEXT: &str = "Thinking it over...";
pub const EMPTY_REPLY_TEXT: &str =
    "The model returned an empty reply — try rephrasing your question.";
pub const DELIVERY_FAILED_TEXT: &str = "Could not deliver the message (Telegram error).";

/// What an inbound message asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Help,
    ClearMemory,
    EnableTraining,
    EnableCtf,
    Empty,
    Prompt(String),
}

/// Splits a leading slash command into name and arguments, stripping any
/// `@botname` suffix. Returns `None` for non-command text.
fn parse_command(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with('/') {
        return None;
    }

    let mut parts = text.splitn(2, |c: char| c.is_whitespace());
    let command = parts.next()?.trim_start_matches('/');
    let args = parts.next().unwrap_or("").trim();
    let command = command.split('@').next()?;

    Some((command, args))
}

/// Pure, total classification of inbound message text.
///
/// Mode buttons match exactly; the clear-memory trigger matches
/// case-insensitively. Unknown slash commands fall through to the model like
/// any other text.
pub fn classify(text: &str) -> Intent {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Intent::Empty;
    }

    if let Some((command, _)) = parse_command(trimmed) {
        match command {
            "start" => return Intent::Start,
            "help" => return Intent::Help,
            _ => {}
        }
    }

    if trimmed == TRAINING_BUTTON {
        return Intent::EnableTraining;
    }
    if trimmed == CTF_BUTTON {
        return Intent::EnableCtf;
    }
    if trimmed.to_lowercase() == CLEAR_BUTTON.to_lowercase() {
        return Intent::ClearMemory;
    }

    Intent::Prompt(trimmed.to_string())
}

/// Outbound side of the chat platform. `send_menu` attaches the mode-selection
/// keyboard; `send_text` sends a bare message (used for chunked resends).
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_menu(&self, chat_id: i64, text: &str) -> BotResult<()>;
    async fn send_text(&self, chat_id: i64, text: &str) -> BotResult<()>;
}

/// Dispatches classified intents against per-user session state.
pub struct MessageRouter {
    sessions: Arc<SessionManager>,
    completion: Arc<dyn CompletionBackend>,
    transport: Arc<dyn ChatTransport>,
}

impl MessageRouter {
    pub fn new(
        sessions: Arc<SessionManager>,
        completion: Arc<dyn CompletionBackend>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            sessions,
            completion,
            transport,
        }
    }

    /// Handles one inbound message from `user_id` in `chat_id`.
    pub async fn handle(&self, chat_id: i64, user_id: i64, text: &str) -> BotResult<()> {
        match classify(text) {
            Intent::Start => self.transport.send_menu(chat_id, WELCOME_TEXT).await,
            Intent::Help => self.transport.send_menu(chat_id, HELP_TEXT).await,
            Intent::ClearMemory => {
                let session = self.sessions.session(user_id);
                session.lock().await.history.clear();
                debug!(user_id, "history cleared");
                self.transport.send_menu(chat_id, MEMORY_CLEARED_TEXT).await
            }
            Intent::EnableTraining => {
                self.set_mode(user_id, Mode::Training).await;
                self.transport
                    .send_menu(chat_id, TRAINING_ENABLED_TEXT)
                    .await
            }
            Intent::EnableCtf => {
                self.set_mode(user_id, Mode::Ctf).await;
                self.transport.send_menu(chat_id, CTF_ENABLED_TEXT).await
            }
            Intent::Empty => self.transport.send_menu(chat_id, EMPTY_INPUT_TEXT).await,
            Intent::Prompt(input) => self.handle_prompt(chat_id, user_id, &input).await,
        }
    }

    async fn set_mode(&self, user_id: i64, mode: Mode) {
        let session = self.sessions.session(user_id);
        session.lock().await.mode = mode;
        debug!(user_id, ?mode, "mode updated");
    }

    /// The free-text path: compose, complete, record, deliver.
    ///
    /// The session mutex is held until both turns are recorded, which
    /// serializes rapid messages from the same user.
    async fn handle_prompt(&self, chat_id: i64, user_id: i64, input: &str) -> BotResult<()> {
        let session = self.sessions.session(user_id);
        let mut session = session.lock().await;

        let messages = compose_prompt(session.mode, session.history.turns(), input);

        // Best-effort acknowledgement; losing it is not fatal.
        if let Err(err) = self.transport.send_menu(chat_id, THINKING_TEXT).await {
            debug!(%err, "thinking notice failed to send");
        }

        let reply = match self.completion.complete(&messages).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(%err, user_id, "completion request failed");
                // History stays untouched on failure.
                return self
                    .transport
                    .send_menu(chat_id, &format!("Error talking to the model: {err}"))
                    .await;
            }
        };

        let reply = if reply.is_empty() {
            EMPTY_REPLY_TEXT.to_string()
        } else {
            reply
        };

        session.history.push(Role::User, input);
        session.history.push(Role::Assistant, reply.clone());
        drop(session);

        self.deliver(chat_id, &reply).await
    }

    /// Sends the reply, degrading to chunked bare sends when the transport
    /// rejects an oversized message.
    async fn deliver(&self, chat_id: i64, reply: &str) -> BotResult<()> {
        let Err(err) = self.transport.send_menu(chat_id, reply).await else {
            return Ok(());
        };

        warn!(%err, chars = reply.chars().count(), "reply rejected by transport");
        if reply.chars().count() > MESSAGE_CHAR_LIMIT {
            for chunk in chunk_by_chars(reply, MESSAGE_CHAR_LIMIT) {
                self.transport.send_text(chat_id, &chunk).await?;
            }
            Ok(())
        } else {
            self.transport.send_text(chat_id, DELIVERY_FAILED_TEXT).await
        }
    }
}

/// Splits text into consecutive chunks of at most `max_chars` characters, in
/// original order, with no word-boundary awareness.
pub fn chunk_by_chars(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return vec![String::new()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
