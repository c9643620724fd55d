use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;

use bot::TelegramBot;
use config::BotConfig;
use flagmate_agent::OpenRouterClient;
use flagmate_bot_core::{MessageRouter, SessionManager};

#[derive(Parser)]
#[command(name = "telegram")]
#[command(about = "Telegram front end for the flagmate CTF assistant")]
struct Cli {
    /// Override the completion model id (takes precedence over OPENROUTER_MODEL)
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = BotConfig::from_env()?;
    if let Some(model) = cli.model {
        config.model = model;
    }

    let completion = Arc::new(OpenRouterClient::new(
        &config.openrouter_api_key,
        &config.model,
        &config.api_url,
    )?);
    let sessions = Arc::new(SessionManager::new());
    let bot = Arc::new(TelegramBot::new(&config.bot_token));
    let router = Arc::new(MessageRouter::new(
        sessions,
        completion,
        Arc::clone(&bot) as Arc<dyn flagmate_bot_core::ChatTransport>,
    ));

    tracing::info!(model = %config.model, "flagmate telegram bot starting");
    bot.run(router).await
}
