//! Wraps teloxide::Bot and implements the core [`Bot`] trait. Production code
//! talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use notebot_core::{bot::parse_message_id, Bot as CoreBot, Chat, NotebotError, Result};
use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId, MessageId, ParseMode},
};

/// Thin wrapper around teloxide::Bot implementing the core Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| NotebotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_message_html(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| NotebotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_placeholder(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| NotebotError::Bot(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
            .map_err(|e| NotebotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn edit_message_html(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| NotebotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| NotebotError::Bot(e.to_string()))?;
        Ok(())
    }
}
