//! LLM side of the flagmate bot: message types, interaction modes,
//! prompt composition and the OpenRouter completion client.

mod completion;
mod prompt;
mod types;

pub use completion::{
    CompletionBackend, CompletionError, OpenRouterClient, DEFAULT_COMPLETION_URL, DEFAULT_MODEL,
};
pub use prompt::{compose_prompt, Mode};
pub use types::{ChatMessage, Role};
