//! Mock collaborators for handler integration tests.
//!
//! Record every transport call and every created page so tests assert on the
//! exact user-visible flow without hitting Telegram, Gemini, Whisper, or
//! Notion.

// Not every test binary uses every mock.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use gemini_client::GenerativeModel;
use notebot_core::{Bot, Chat, Message, MessageContent, Result, User};
use notion_client::{CreatedPage, NewPage, NotionError, PageWriter};
use speech_client::SpeechToText;
use std::sync::Mutex;

/// One recorded transport call: method name, chat id, edited message id, text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCall {
    pub method: &'static str,
    pub chat_id: i64,
    pub message_id: Option<String>,
    pub text: String,
}

/// Mock Bot that records every call and returns a fixed placeholder id.
#[derive(Default)]
pub struct MockBot {
    pub calls: Mutex<Vec<BotCall>>,
}

pub const PLACEHOLDER_ID: &str = "42";

impl MockBot {
    fn record(&self, method: &'static str, chat: &Chat, message_id: Option<&str>, text: &str) {
        self.calls.lock().unwrap().push(BotCall {
            method,
            chat_id: chat.id,
            message_id: message_id.map(|s| s.to_string()),
            text: text.to_string(),
        });
    }

    /// Returns recorded calls of the given method.
    pub fn calls_of(&self, method: &str) -> Vec<BotCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record("send_message", chat, None, text);
        Ok(())
    }

    async fn send_message_html(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record("send_message_html", chat, None, text);
        Ok(())
    }

    async fn send_placeholder(&self, chat: &Chat, text: &str) -> Result<String> {
        self.record("send_placeholder", chat, None, text);
        Ok(PLACEHOLDER_ID.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record("edit_message", chat, Some(message_id), text);
        Ok(())
    }

    async fn edit_message_html(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record("edit_message_html", chat, Some(message_id), text);
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.record("send_typing", chat, None, "");
        Ok(())
    }
}

/// Mock generative model: fixed text reply (or failure) and fixed vision reply.
pub struct MockModel {
    pub reply: std::result::Result<String, String>,
    pub vision_reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl MockModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            vision_reply: String::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            vision_reply: String::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(s) => Ok(s.clone()),
            Err(m) => Err(anyhow::anyhow!("{m}")),
        }
    }

    async fn generate_with_image(
        &self,
        _prompt: &str,
        _mime_type: &str,
        _image: &[u8],
    ) -> anyhow::Result<String> {
        Ok(self.vision_reply.clone())
    }
}

/// Mock transcription service returning a fixed transcript.
pub struct MockSpeech {
    pub transcript: String,
}

#[async_trait]
impl SpeechToText for MockSpeech {
    async fn transcribe(&self, _filename: &str, _audio: Vec<u8>) -> anyhow::Result<String> {
        Ok(self.transcript.clone())
    }
}

/// How the mock page writer responds.
pub enum PageOutcome {
    Created,
    ApiError(u16, &'static str),
}

/// Mock page writer recording every NewPage.
pub struct MockPages {
    pub outcome: PageOutcome,
    pub pages: Mutex<Vec<NewPage>>,
}

impl MockPages {
    pub fn succeeding() -> Self {
        Self {
            outcome: PageOutcome::Created,
            pages: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(status: u16, body: &'static str) -> Self {
        Self {
            outcome: PageOutcome::ApiError(status, body),
            pages: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageWriter for MockPages {
    async fn create_page(&self, page: &NewPage) -> std::result::Result<CreatedPage, NotionError> {
        self.pages.lock().unwrap().push(page.clone());
        match self.outcome {
            PageOutcome::Created => Ok(CreatedPage {
                id: "page-1".to_string(),
                url: None,
            }),
            PageOutcome::ApiError(status, body) => Err(NotionError::Api {
                status,
                body: body.to_string(),
            }),
        }
    }
}

/// Builds an incoming message with the given content.
pub fn message(content: MessageContent) -> Message {
    Message {
        id: "7".to_string(),
        user: User {
            id: 11,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 100,
            chat_type: "private".to_string(),
        },
        content,
        created_at: Utc::now(),
    }
}

pub fn text_message(text: &str) -> Message {
    message(MessageContent::Text(text.to_string()))
}
