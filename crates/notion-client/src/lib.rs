//! # Notion client
//!
//! Creates pages in a fixed Notion database. Defines the [`PageWriter`] trait
//! so handlers depend on the seam; [`NotionClient`] implements it against the
//! `/v1/pages` endpoint.
//!
//! ## Page shape
//!
//! Title property `mytext`, rich-text `summary` and `tags`, optional external
//! `image` file (a URL served by the file server) and optional `link` URL.
//!
//! ## Errors
//!
//! A non-success HTTP status becomes [`NotionError::Api`] carrying the response
//! body; that body backs the user-visible `Error: ...` reply. Transport
//! failures surface as [`NotionError::Http`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

const NOTION_API_BASE: &str = "https://api.notion.com";
const NOTION_VERSION: &str = "2022-06-28";

/// A page to create: title plus optional enrichment fields.
#[derive(Debug, Clone, Default)]
pub struct NewPage {
    pub title: String,
    pub summary: String,
    pub tags: String,
    /// Externally served image URL (file server base + saved filename).
    pub image_url: Option<String>,
    /// Source link the captured text came from.
    pub link_url: Option<String>,
}

/// Created-page data returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPage {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Error, Debug)]
pub enum NotionError {
    /// Non-success status; `body` is the API's error text shown to the user.
    #[error("Notion API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Workspace page-creation interface.
#[async_trait]
pub trait PageWriter: Send + Sync {
    /// Creates a page in the configured database.
    async fn create_page(&self, page: &NewPage) -> Result<CreatedPage, NotionError>;
}

/// Notion `/v1/pages` client bound to one database.
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: Client,
    api_key: String,
    database_id: String,
    base_url: String,
}

impl NotionClient {
    /// Creates a client for the given integration token and database.
    pub fn new(api_key: String, database_id: String) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            database_id,
            base_url: NOTION_API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL (tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn payload(&self, page: &NewPage) -> serde_json::Value {
        let mut properties = json!({
            "mytext": {"title": [{"text": {"content": page.title}}]},
            "summary": {"rich_text": [{"text": {"content": page.summary}}]},
            "tags": {"rich_text": [{"text": {"content": page.tags}}]},
        });

        if let Some(url) = &page.image_url {
            properties["image"] = json!({
                "type": "files",
                "files": [{
                    "type": "external",
                    "name": "Captured image",
                    "external": {"url": url}
                }]
            });
        }
        if let Some(url) = &page.link_url {
            properties["link"] = json!({"type": "url", "url": url});
        }

        json!({
            "parent": {"database_id": self.database_id},
            "properties": properties,
        })
    }
}

#[async_trait]
impl PageWriter for NotionClient {
    async fn create_page(&self, page: &NewPage) -> Result<CreatedPage, NotionError> {
        let url = format!("{}/v1/pages", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&self.payload(page))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedPage = response.json().await?;
        info!(
            page_id = %created.id,
            title_len = page.title.len(),
            has_image = page.image_url.is_some(),
            has_link = page.link_url.is_some(),
            "Notion page created"
        );
        Ok(created)
    }
}
