//! Per-user session state.
//!
//! History and mode are independently scoped by the Telegram user id and held
//! together behind one per-user mutex. The router holds that mutex across an
//! entire free-text exchange, so two rapid messages from the same user are
//! processed strictly in arrival order; different users never contend.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use flagmate_agent::Mode;

use crate::history::ConversationHistory;

/// State for one chat user. Created on first contact, lost on restart.
#[derive(Debug, Default)]
pub struct UserSession {
    pub history: ConversationHistory,
    pub mode: Mode,
}

/// Owns all per-user sessions, keyed by Telegram user id.
///
/// The user map is unbounded; the process is expected to be restarted before
/// that matters (see DESIGN.md).
#[derive(Default)]
pub struct SessionManager {
    sessions: DashMap<i64, Arc<Mutex<UserSession>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session handle for a user, creating a default one
    /// (empty history, neutral mode) on first contact.
    pub fn session(&self, user_id: i64) -> Arc<Mutex<UserSession>> {
        self.sessions.entry(user_id).or_default().clone()
    }

    pub fn active_user_count(&self) -> usize {
        self.sessions.len()
    }
}
