//! Bounded per-user conversation history.

use flagmate_agent::{ChatMessage, Role};

/// Number of turns kept per user; oldest are dropped first.
pub const HISTORY_LIMIT: usize = 10;

/// Ordered sequence of prior turns for one user. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<ChatMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn, evicting from the front once the limit is exceeded.
    /// Always succeeds.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ChatMessage::new(role, content));
        if self.turns.len() > HISTORY_LIMIT {
            let excess = self.turns.len() - HISTORY_LIMIT;
            self.turns.drain(..excess);
        }
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drops all turns. A no-op when there is nothing to drop.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
