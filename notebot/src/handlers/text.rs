//! Text capture: annotate the message (optionally enriched from a linked
//! page), save it as a workspace page, and edit the placeholder with the
//! HTML-rendered confirmation.

use crate::capture::Capture;
use crate::handlers::log_error_chain;
use crate::messages::PLACEHOLDER;
use crate::web;
use async_trait::async_trait;
use notebot_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Captures plain text messages. Commands and non-text content are ignored.
pub struct TextCaptureHandler {
    bot: Arc<dyn Bot>,
    capture: Arc<Capture>,
    http: reqwest::Client,
}

impl TextCaptureHandler {
    pub fn new(bot: Arc<dyn Bot>, capture: Arc<Capture>) -> Self {
        Self {
            bot,
            capture,
            http: reqwest::Client::new(),
        }
    }

    /// When the text carries a URL, pulls the linked page's content for the
    /// annotation and its og:image for the saved page. Fetch failures degrade
    /// to capturing the bare text.
    async fn enrich(&self, text: &str) -> (String, Option<String>, Option<String>) {
        let Some(url) = web::find_links(text).into_iter().next() else {
            return (text.to_string(), None, None);
        };

        match web::fetch_page(&self.http, &url).await {
            Ok(extract) => {
                info!(url = %url, has_image = extract.image_url.is_some(), "step: linked page fetched");
                (extract.text, extract.image_url, Some(url))
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Linked page fetch failed; capturing bare text");
                (text.to_string(), None, Some(url))
            }
        }
    }
}

#[async_trait]
impl Handler for TextCaptureHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(text) = message.content.text() else {
            return Ok(HandlerResponse::Ignore);
        };
        if text.trim_start().starts_with('/') {
            return Ok(HandlerResponse::Ignore);
        }

        let placeholder_id = self
            .bot
            .send_placeholder(&message.chat, PLACEHOLDER)
            .await?;
        self.bot.send_typing(&message.chat).await?;

        let (content, image_url, link_url) = self.enrich(text).await;

        match self.capture.save(text, &content, image_url, link_url).await {
            Ok(reply) => {
                let html = markup::format_text_to_html(&reply);
                self.bot
                    .edit_message_html(&message.chat, &placeholder_id, &html)
                    .await?;
                info!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    "step: text captured"
                );
                Ok(HandlerResponse::Reply(html))
            }
            Err(e) => {
                // Placeholder stays unedited; the turn produced no update.
                log_error_chain(&e, "Text capture failed");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
