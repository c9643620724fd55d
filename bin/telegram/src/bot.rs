//! Teloxide glue: long-polling dispatcher and the transport implementation.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup};
use tracing::{debug, error, info};

use flagmate_bot_core::{
    BotError, BotResult, ChatTransport, MessageRouter, CLEAR_BUTTON, CTF_BUTTON, TRAINING_BUTTON,
};

pub struct TelegramBot {
    bot: Bot,
}

impl TelegramBot {
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Run the bot with long-polling, one handler task per update.
    pub async fn run(self: Arc<Self>, router: Arc<MessageRouter>) -> Result<()> {
        info!("Starting Telegram bot...");

        let handler = dptree::entry().branch(Update::filter_message().endpoint(
            |msg: Message, router: Arc<MessageRouter>| async move {
                let Some(user_id) = msg.from.as_ref().map(|user| user.id.0 as i64) else {
                    debug!("message has no sender, ignoring");
                    return respond(());
                };
                let text = msg.text().unwrap_or("");

                if let Err(err) = router.handle(msg.chat.id.0, user_id, text).await {
                    error!("Error handling message: {err}");
                }
                respond(())
            },
        ));

        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![router])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram bot stopped");
        Ok(())
    }
}

/// The fixed 2x2 reply keyboard offered with every menu send.
fn main_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new([
        [
            KeyboardButton::new(TRAINING_BUTTON),
            KeyboardButton::new(CTF_BUTTON),
        ],
        [
            KeyboardButton::new("/help"),
            KeyboardButton::new(CLEAR_BUTTON),
        ],
    ])
    .resize_keyboard()
}

#[async_trait]
impl ChatTransport for TelegramBot {
    async fn send_menu(&self, chat_id: i64, text: &str) -> BotResult<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(main_keyboard())
            .await
            .map_err(|err| BotError::SendFailed(err.to_string()))?;
        Ok(())
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> BotResult<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|err| BotError::SendFailed(err.to_string()))?;
        Ok(())
    }
}
