//! Link enrichment: find URLs in captured text and pull the linked page's main
//! text, meta description, and `og:image` so the saved note carries the source.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z0-9]|[$-_@.&+]|[!*(),]|%[0-9a-fA-F]{2})+").unwrap()
});
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Main text and image pulled from a linked page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtract {
    /// Meta description + collapsed page text, prompt-ready.
    pub text: String,
    /// `og:image` URL when the page declares one.
    pub image_url: Option<String>,
}

/// Returns all URLs found in the text, in order.
pub fn find_links(text: &str) -> Vec<String> {
    URL_RE.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Fetches a page and extracts its main content.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<PageExtract> {
    let body = client.get(url).send().await?.error_for_status()?.text().await?;
    debug!(url = %url, body_len = body.len(), "Fetched linked page");
    Ok(extract(&body))
}

/// Extracts meta description, main text (`p`/`article`/`section`/`main`
/// elements), and the `og:image` URL from an HTML document.
pub fn extract(html: &str) -> PageExtract {
    let doc = Html::parse_document(html);

    let content_sel = Selector::parse("p, article, section, main").unwrap();
    let chunks: Vec<String> = doc
        .select(&content_sel)
        .map(|el| el.text().collect::<String>())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let main_text = WS_RE.replace_all(&chunks.join("\n"), " ").trim().to_string();

    let description = select_meta_content(&doc, r#"meta[name="description"]"#);
    let image_url = select_meta_content(&doc, r#"meta[property="og:image"]"#);

    let text = format!(
        "META DESCRIPTION: {}\nPAGE CONTENT: {}",
        description.unwrap_or_default(),
        main_text
    );

    PageExtract { text, image_url }
}

fn select_meta_content(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    doc.select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.to_string())
}

/// Joins a base URL and a filename with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_urls_in_text() {
        let links = find_links("see http://x.com/a?q=1 and https://y.io/path");
        assert_eq!(links, vec!["http://x.com/a?q=1", "https://y.io/path"]);
        assert!(find_links("no links here").is_empty());
    }

    #[test]
    fn extracts_text_description_and_og_image() {
        let html = r#"<html><head>
            <meta name="description" content="A test page">
            <meta property="og:image" content="http://img.local/cover.png">
            </head><body>
            <p>First   paragraph.</p>
            <p></p>
            <article>Article body.</article>
            </body></html>"#;
        let extract = extract(html);
        assert_eq!(extract.image_url.as_deref(), Some("http://img.local/cover.png"));
        assert!(extract.text.starts_with("META DESCRIPTION: A test page"));
        assert!(extract.text.contains("First paragraph."));
        assert!(extract.text.contains("Article body."));
    }

    #[test]
    fn extract_without_meta_yields_empty_description() {
        let extract = extract("<html><body><p>hi</p></body></html>");
        assert_eq!(extract.text, "META DESCRIPTION: \nPAGE CONTENT: hi");
        assert_eq!(extract.image_url, None);
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://f.local", "a.png"), "http://f.local/a.png");
        assert_eq!(join_url("http://f.local/", "a.png"), "http://f.local/a.png");
    }
}
