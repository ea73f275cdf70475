//! /start and /help replies.

use crate::messages::{HELP_MESSAGE, WELCOME_MESSAGE};
use async_trait::async_trait;
use notebot_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::info;

/// Replies to /start and /help; other commands fall through unanswered.
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

/// Extracts the command name from a message text: `/start@mybot args` -> `/start`.
fn command_of(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }
    Some(first.split('@').next().unwrap_or(first))
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(text) = message.content.text() else {
            return Ok(HandlerResponse::Ignore);
        };

        let reply = match command_of(text) {
            Some("/start") => WELCOME_MESSAGE,
            Some("/help") => HELP_MESSAGE,
            _ => return Ok(HandlerResponse::Ignore),
        };

        self.bot.send_message_html(&message.chat, reply).await?;
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "step: command answered"
        );
        Ok(HandlerResponse::Reply(reply.to_string()))
    }
}
