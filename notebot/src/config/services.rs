//! External service config: Gemini, transcription, Notion, file server.

use anyhow::{Context, Result};
use std::env;

/// Config for the three SaaS collaborators and the image file server.
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    /// GEMINI_API_KEY (falls back to GOOGLE_API_KEY)
    pub gemini_api_key: String,
    /// GEMINI_MODEL, default gemini-pro
    pub gemini_model: String,
    /// GEMINI_VISION_MODEL, default gemini-pro-vision
    pub gemini_vision_model: String,
    /// OPENAI_API_KEY (transcription)
    pub openai_api_key: String,
    /// OPENAI_BASE_URL, optional override for compatible endpoints
    pub openai_base_url: Option<String>,
    /// NOTION_API_KEY
    pub notion_api_key: String,
    /// NOTION_DATABASE_ID
    pub notion_database_id: String,
    /// FILESERVER: base URL under which saved images are served
    pub file_server_url: String,
    /// FILES_DIR: directory saved images are written to, default "files"
    pub files_dir: String,
}

impl ServicesConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .context("GEMINI_API_KEY (or GOOGLE_API_KEY) not set")?;
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string());
        let gemini_vision_model = env::var("GEMINI_VISION_MODEL")
            .unwrap_or_else(|_| "gemini-pro-vision".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL").ok();
        let notion_api_key =
            env::var("NOTION_API_KEY").context("NOTION_API_KEY not set")?;
        let notion_database_id =
            env::var("NOTION_DATABASE_ID").context("NOTION_DATABASE_ID not set")?;
        let file_server_url = env::var("FILESERVER")
            .unwrap_or_else(|_| "http://localhost:8009".to_string());
        let files_dir = env::var("FILES_DIR").unwrap_or_else(|_| "files".to_string());

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_vision_model,
            openai_api_key,
            openai_base_url,
            notion_api_key,
            notion_database_id,
            file_server_url,
            files_dir,
        })
    }

    /// Validate config (file server base must be a valid URL).
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.file_server_url).is_err() {
            anyhow::bail!("FILESERVER is not a valid URL: {}", self.file_server_url);
        }
        Ok(())
    }
}
