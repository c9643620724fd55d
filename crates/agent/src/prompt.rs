//! Interaction modes and prompt assembly.
//!
//! A mode picks which system directive governs the assistant's behavior for a
//! user. The system message is rebuilt from the current mode on every request
//! and never enters stored history.

use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, Role};

const TRAINING_PROMPT: &str = "You are a professional cybersecurity and CTF instructor. \
    Explain in plain, simple language, thoroughly and step by step. \
    Show example commands, the tools to use, and exactly what to check in the target application or site. \
    Simplify, but never drop the important details. No fluff, straight to the point. \
    Keep the tone casual, like a twenty-year-old student, with minimal emoji.";

const CTF_PROMPT: &str = "You are an experienced CTF player. You do not teach, you deliver working solutions. \
    If the task is unclear, ask one to three specific clarifying questions. \
    Write only practical steps, commands, useful payloads and solution variants. \
    Short and to the point, no beginner explanations. \
    Keep the tone casual, like a twenty-year-old student, with minimal emoji.";

const NEUTRAL_PROMPT: &str = "You are a cybersecurity and CTF expert. \
    Answer to the point: what to check, which tools to use and how to apply the vulnerability. \
    Show example commands when needed. Keep it simple and direct.";

/// Per-user interaction mode. Unseen users get `Neutral`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Neutral,
    Training,
    Ctf,
}

impl Mode {
    /// The system directive for this mode.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Mode::Training => TRAINING_PROMPT,
            Mode::Ctf => CTF_PROMPT,
            Mode::Neutral => NEUTRAL_PROMPT,
        }
    }
}

/// Builds the message list for one completion request:
/// system directive, then history oldest-to-newest, then the new user turn.
pub fn compose_prompt(mode: Mode, history: &[ChatMessage], input: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(mode.system_prompt()));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(input));
    messages
}
