//! # Speech client
//!
//! Speech-to-text over an OpenAI-compatible transcription endpoint. Defines the
//! [`SpeechToText`] trait; [`WhisperClient`] implements it with async-openai.
//!
//! The audio is sent as an in-memory upload whose filename must carry a
//! recognized extension, since the service keys the decoder off it; an unknown
//! extension is rejected before any network call.

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::{AudioInput, CreateTranscriptionRequestArgs},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Extensions the transcription endpoint accepts.
pub const AUDIO_EXTENSIONS: [&str; 6] = ["oga", "ogg", "mp3", "wav", "m4a", "webm"];

/// Speech-to-text interface: audio bytes with a named file in, transcript out.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Returns the transcript for the given audio. `filename` must end in one
    /// of [`AUDIO_EXTENSIONS`].
    async fn transcribe(&self, filename: &str, audio: Vec<u8>) -> Result<String>;
}

/// Whisper transcription client.
#[derive(Clone)]
pub struct WhisperClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl WhisperClient {
    /// Creates a client for the default OpenAI endpoint.
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "whisper-1".to_string(),
        }
    }

    /// Uses a custom base URL (compatible transcription services).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "whisper-1".to_string(),
        }
    }

    /// Sets the transcription model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

/// Returns true when the filename ends in a recognized audio extension.
pub fn has_audio_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[async_trait]
impl SpeechToText for WhisperClient {
    async fn transcribe(&self, filename: &str, audio: Vec<u8>) -> Result<String> {
        if !has_audio_extension(filename) {
            anyhow::bail!(
                "Unrecognized audio extension in '{}' (expected one of {:?})",
                filename,
                AUDIO_EXTENSIONS
            );
        }

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from_vec_u8(filename.to_string(), audio))
            .model(&self.model)
            .build()?;

        let response = self.client.audio().transcribe(request).await?;

        info!(
            model = %self.model,
            filename = %filename,
            transcript_len = response.text.len(),
            "Transcription completed"
        );
        Ok(response.text)
    }
}
