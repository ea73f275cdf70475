//! Core types: user, chat, message with content variants, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// Payload of an incoming message. Media variants carry the already-downloaded
/// bytes so handlers never touch the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageContent {
    Text(String),
    /// Largest available photo size, as downloaded bytes.
    Photo(Vec<u8>),
    /// Voice note bytes (OGG/Opus as delivered by Telegram).
    Voice(Vec<u8>),
    /// Anything the bot does not capture (stickers, documents, ...).
    Unsupported,
}

impl MessageContent {
    /// Returns the text for `Text` content, None otherwise.
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// A single incoming message with user, chat, and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

/// Handler result for the chain. `Reply(text)` carries the final response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Not this handler's content, try next.
    Ignore,
    /// Stop the chain and attach the reply text that was sent to the user.
    Reply(String),
}

/// A single message handler. The chain runs handlers in order until one returns
/// Stop or Reply; handlers return Ignore for content they do not own.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Processes the message. Return Stop or Reply to end the chain. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
}
