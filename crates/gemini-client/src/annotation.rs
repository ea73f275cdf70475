//! Annotation: ask the model for a `{summary, tags}` record and parse its reply.
//!
//! The model is instructed to return a single strict JSON object; the parser is
//! best-effort and falls back to empty fields on any mismatch, so a bad model
//! reply degrades to a page without summary/tags instead of an error.

use serde::Deserialize;

/// Summary and comma-separated tags for a captured text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: String,
}

const ANNOTATION_INSTRUCTION: &str = "Summarize the text below and give tags for it. \
Reply with a single JSON object {\"summary\": \"...\", \"tags\": \"tag1, tag2, tag3\"} \
and nothing else.\n\nText: ";

/// Builds the annotation prompt for the given text.
pub fn annotation_prompt(text: &str) -> String {
    format!("{ANNOTATION_INSTRUCTION}{text}")
}

/// Parses a model reply into an [`Annotation`]. Tolerates a surrounding
/// ```` ```json ```` fence; anything unparseable yields empty fields.
pub fn parse_annotation(reply: &str) -> Annotation {
    serde_json::from_str(strip_code_fence(reply)).unwrap_or_default()
}

fn strip_code_fence(s: &str) -> &str {
    let t = s.trim();
    if let Some(inner) = t.strip_prefix("```") {
        let inner = inner.strip_prefix("json").unwrap_or(inner);
        let inner = inner.strip_suffix("```").unwrap_or(inner);
        return inner.trim();
    }
    t
}
