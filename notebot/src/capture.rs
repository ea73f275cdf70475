//! Capture orchestration: annotate content with the generative model, create
//! the workspace page, and build the user-facing confirmation text.

use gemini_client::{annotation_prompt, parse_annotation, GenerativeModel};
use notion_client::{NewPage, NotionError, PageWriter};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shared capture pipeline used by the text, photo, and voice handlers.
pub struct Capture {
    model: Arc<dyn GenerativeModel>,
    pages: Arc<dyn PageWriter>,
}

impl Capture {
    pub fn new(model: Arc<dyn GenerativeModel>, pages: Arc<dyn PageWriter>) -> Self {
        Self { model, pages }
    }

    /// Annotates `content`, creates a page titled `title`, and returns the
    /// reply text for the user: a confirmation on success, the API's literal
    /// `Error: ...` body on a rejected request. Transport failures propagate.
    #[instrument(skip(self, title, content, image_url, link_url))]
    pub async fn save(
        &self,
        title: &str,
        content: &str,
        image_url: Option<String>,
        link_url: Option<String>,
    ) -> anyhow::Result<String> {
        let reply = self.model.generate(&annotation_prompt(content)).await?;
        let annotation = parse_annotation(&reply);
        if annotation.summary.is_empty() && annotation.tags.is_empty() {
            warn!(reply_len = reply.len(), "Annotation reply did not parse; saving without summary/tags");
        }

        let page = NewPage {
            title: title.to_string(),
            summary: annotation.summary.clone(),
            tags: annotation.tags.clone(),
            image_url,
            link_url,
        };

        match self.pages.create_page(&page).await {
            Ok(created) => {
                info!(page_id = %created.id, "step: page captured");
                Ok(format!(
                    "{} added to Notion : {} {}",
                    title, annotation.summary, annotation.tags
                ))
            }
            Err(NotionError::Api { status, body }) => {
                warn!(status, body = %body, "Notion rejected the page");
                Ok(format!("Error: {}", body))
            }
            Err(e) => Err(e.into()),
        }
    }
}
