//! Voice capture: transcribe the note in memory and file the transcript.

use crate::capture::Capture;
use crate::handlers::log_error_chain;
use crate::messages::{PLACEHOLDER, VOICE_FILENAME};
use async_trait::async_trait;
use notebot_core::{Bot, Handler, HandlerResponse, Message, Result};
use speech_client::SpeechToText;
use std::sync::Arc;
use tracing::info;

/// Captures voice messages.
pub struct VoiceCaptureHandler {
    bot: Arc<dyn Bot>,
    capture: Arc<Capture>,
    stt: Arc<dyn SpeechToText>,
}

impl VoiceCaptureHandler {
    pub fn new(bot: Arc<dyn Bot>, capture: Arc<Capture>, stt: Arc<dyn SpeechToText>) -> Self {
        Self { bot, capture, stt }
    }

    async fn process(&self, message: &Message, audio: &[u8]) -> anyhow::Result<String> {
        let transcript = self.stt.transcribe(VOICE_FILENAME, audio.to_vec()).await?;
        info!(
            user_id = message.user.id,
            transcript_len = transcript.len(),
            "step: voice transcribed"
        );
        self.capture.save(&transcript, &transcript, None, None).await
    }
}

#[async_trait]
impl Handler for VoiceCaptureHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let notebot_core::MessageContent::Voice(ref audio) = message.content else {
            return Ok(HandlerResponse::Ignore);
        };

        let placeholder_id = self
            .bot
            .send_placeholder(&message.chat, PLACEHOLDER)
            .await?;
        self.bot.send_typing(&message.chat).await?;

        match self.process(message, audio).await {
            Ok(reply) => {
                self.bot
                    .edit_message(&message.chat, &placeholder_id, &reply)
                    .await?;
                Ok(HandlerResponse::Reply(reply))
            }
            Err(e) => {
                log_error_chain(&e, "Voice capture failed");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
