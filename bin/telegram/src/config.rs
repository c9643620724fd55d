//! Environment-driven configuration.
//!
//! Both secrets are required at startup; a missing or empty value aborts with
//! a diagnostic instead of running with dead credentials.

use flagmate_agent::{DEFAULT_COMPLETION_URL, DEFAULT_MODEL};

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub openrouter_api_key: String,
    pub model: String,
    pub api_url: String,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bot_token = required(&get, "TELEGRAM_BOT_TOKEN")?;
        let openrouter_api_key = required(&get, "OPENROUTER_API_KEY")?;
        let model = get("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url =
            get("OPENROUTER_API_URL").unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string());

        Ok(Self {
            bot_token,
            openrouter_api_key,
            model,
            api_url,
        })
    }
}

fn required(get: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<String> {
    match get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => anyhow::bail!("{key} is set but empty"),
        None => anyhow::bail!("{key} environment variable is required"),
    }
}
