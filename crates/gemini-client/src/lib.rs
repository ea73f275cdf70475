//! # Gemini client
//!
//! Generative text/vision client for Google's `generateContent` endpoint.
//! Defines the [`GenerativeModel`] trait so handlers depend on the seam, not on
//! this implementation, plus [`annotation`] for turning a model reply into a
//! `{summary, tags}` record.
//!
//! ## Configuration
//!
//! - **API key**: passed to [`GeminiClient::new`] (header `x-goog-api-key`).
//! - **Models**: `gemini-pro` for text, `gemini-pro-vision` for image prompts;
//!   override with `with_model` / `with_vision_model`.
//! - **Base URL**: override with `with_base_url` (tests, regional endpoints).

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod annotation;

pub use annotation::{annotation_prompt, parse_annotation, Annotation};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Generative model interface: plain text prompt, or prompt plus one image.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the model reply text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Returns the model reply for a prompt with one inline image
    /// (`mime_type` e.g. "image/png").
    async fn generate_with_image(
        &self,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String>;
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    vision_model: String,
}

impl GeminiClient {
    /// Creates a client with the default endpoint and models.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
            model: "gemini-pro".to_string(),
            vision_model: "gemini-pro-vision".to_string(),
        }
    }

    /// Overrides the API base URL (tests, compatible endpoints).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the text model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Sets the vision model used for image prompts.
    pub fn with_vision_model(mut self, model: String) -> Self {
        self.vision_model = model;
        self
    }

    async fn generate_content(&self, model: &str, parts: Vec<Part>) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig::default(),
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {}: {}", status, body);
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("No candidates in Gemini response");
        }

        info!(model = %model, reply_len = text.len(), "Gemini generateContent completed");
        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let model = self.model.clone();
        self.generate_content(&model, vec![Part::text(prompt)]).await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String> {
        let model = self.vision_model.clone();
        let parts = vec![
            Part::text(prompt),
            Part::inline_data(mime_type, BASE64.encode(image)),
        ];
        self.generate_content(&model, parts).await
    }
}

// --- Wire types ---

/// Generation parameters sent with every request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: i32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
            top_k: 32,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}
