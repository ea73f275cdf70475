//! Bot abstraction for sending and editing messages.
//!
//! [`Bot`] is transport-agnostic; the notebot binary implements it via teloxide.
//! Handlers drive the placeholder flow through this trait, so tests can
//! substitute a mock and assert on the exact edits.

use crate::error::{NotebotError, Result};
use crate::types::Chat;
use async_trait::async_trait;

/// Abstraction over the chat transport: send, edit, typing indicator.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a message rendered as HTML markup.
    async fn send_message_html(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a placeholder message and returns its id for later edits.
    async fn send_placeholder(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Edits an already-sent message as plain text.
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Edits an already-sent message, rendering the text as HTML markup.
    async fn edit_message_html(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Shows the "typing..." chat action while a turn is being processed.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_message implementations.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| NotebotError::Bot(format!("Invalid message_id for edit: {}", s)))
}
