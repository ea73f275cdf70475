//! Photo capture: save the image for the file server, caption it with the
//! vision model, and file a page carrying the externally served image URL.

use crate::capture::Capture;
use crate::handlers::log_error_chain;
use crate::messages::{PLACEHOLDER, VISION_PROMPT};
use crate::web::join_url;
use async_trait::async_trait;
use gemini_client::GenerativeModel;
use notebot_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Captures photo messages.
pub struct PhotoCaptureHandler {
    bot: Arc<dyn Bot>,
    capture: Arc<Capture>,
    model: Arc<dyn GenerativeModel>,
    files_dir: PathBuf,
    file_server_url: String,
}

impl PhotoCaptureHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        capture: Arc<Capture>,
        model: Arc<dyn GenerativeModel>,
        files_dir: impl Into<PathBuf>,
        file_server_url: String,
    ) -> Self {
        Self {
            bot,
            capture,
            model,
            files_dir: files_dir.into(),
            file_server_url,
        }
    }

    /// Writes the image under the file-server directory and returns the
    /// filename it will be served as.
    async fn save_image(&self, image: &[u8]) -> anyhow::Result<String> {
        let filename = format!("{}.png", Uuid::new_v4());
        tokio::fs::create_dir_all(&self.files_dir).await?;
        tokio::fs::write(self.files_dir.join(&filename), image).await?;
        Ok(filename)
    }

    async fn process(&self, message: &Message, image: &[u8]) -> anyhow::Result<String> {
        let filename = self.save_image(image).await?;
        let caption = self
            .model
            .generate_with_image(VISION_PROMPT, "image/png", image)
            .await?;
        let image_url = join_url(&self.file_server_url, &filename);

        info!(
            user_id = message.user.id,
            filename = %filename,
            caption_len = caption.len(),
            "step: photo captioned and saved"
        );
        self.capture
            .save(&caption, &caption, Some(image_url), None)
            .await
    }
}

#[async_trait]
impl Handler for PhotoCaptureHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let notebot_core::MessageContent::Photo(ref image) = message.content else {
            return Ok(HandlerResponse::Ignore);
        };

        let placeholder_id = self
            .bot
            .send_placeholder(&message.chat, PLACEHOLDER)
            .await?;
        self.bot.send_typing(&message.chat).await?;

        match self.process(message, image).await {
            Ok(reply) => {
                self.bot
                    .edit_message(&message.chat, &placeholder_id, &reply)
                    .await?;
                Ok(HandlerResponse::Reply(reply))
            }
            Err(e) => {
                log_error_chain(&e, "Photo capture failed");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
