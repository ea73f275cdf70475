//! # Markup
//!
//! Converts model-generated markdown into the restricted HTML subset a chat
//! client will render: `<b>`, `<i>`, `<a href=...>`, `<code>`, and
//! `<pre language="...">` for an allow-list of languages.
//!
//! ## Behavior
//!
//! Transformation rules run in a fixed order, each over the whole remaining
//! text: bold, italic, bullets, headings (level 2+ before level 1), fenced code
//! blocks, links, tag-balance repair, ASCII filter. Malformed input degrades
//! gracefully; the function never fails.
//!
//! ## Usage
//!
//! Used by the capture handlers before editing a Telegram message with HTML
//! parse mode. Pure and stateless; safe to call from any number of concurrent
//! tasks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Languages rendered as `<pre language="...">` blocks; anything else falls
/// back to `<code>`.
pub const SUPPORTED_LANGUAGES: [&str; 3] = ["python", "javascript", "java"];

/// Glyph substituted for a leading `*` bullet marker.
pub const BULLET: char = '\u{26AA}';

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\* ?(.*)$").unwrap());
static HEADING2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{2,}(.*)$").unwrap());
static HEADING1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#(.*)$").unwrap());
static FENCE_LANG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(\w+)").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)[^>]*>").unwrap());

/// Converts markdown text to safe chat HTML.
///
/// Output is restricted to the structural tags above plus printable ASCII (the
/// bullet glyph is the one non-ASCII character the converter itself emits).
/// No unmatched opening tag survives; never fails for any input.
pub fn format_text_to_html(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "<b>$1</b>");
    let text = ITALIC_RE.replace_all(&text, "<i>$1</i>");
    let text = BULLET_RE.replace_all(&text, format!("{BULLET} $1").as_str());

    // Level 2+ must run before level 1, otherwise a `##` line would partially
    // match the single-`#` pattern.
    let text = HEADING2_RE.replace_all(&text, |caps: &regex::Captures| {
        caps[1].trim().to_uppercase()
    });
    let text = HEADING1_RE.replace_all(&text, |caps: &regex::Captures| {
        format!("<b>{}</b>", caps[1].trim().to_uppercase())
    });

    let text = replace_code_fences(text.into_owned());
    let text = LINK_RE.replace_all(&text, "<a href=\"$2\">$1</a>");
    let text = strip_unbalanced_tags(text.into_owned());

    // Delete every non-ASCII character, sparing only the bullet glyph inserted
    // above.
    text.chars()
        .filter(|&c| c.is_ascii() || c == BULLET)
        .collect()
}

/// Consumes triple-backtick pairs one at a time. An allow-listed language tag
/// opens `<pre language="...">`; an unknown or missing tag opens `<code>`.
/// Each iteration removes at least one delimiter, so the loop terminates even
/// for unpaired fences.
fn replace_code_fences(mut text: String) -> String {
    while text.contains("```") {
        match FENCE_LANG_RE.captures(&text).map(|c| c[1].to_string()) {
            Some(lang) => {
                let open = format!("```{lang}");
                if SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
                    text = text.replacen(&open, &format!("<pre language=\"{lang}\">"), 1);
                    text = text.replacen("```", "</pre>", 1);
                } else {
                    text = text.replacen(&open, "<code>", 1);
                    text = text.replacen("```", "</code>", 1);
                }
            }
            None => {
                text = text.replacen("```", "<code>", 1);
                text = text.replacen("```", "</code>", 1);
            }
        }
    }
    text
}

/// Tag-balance repair: track open tags with a stack (mismatched closers are
/// ignored, not an error). Every tag name still open at the end of the scan has
/// all of its opening tags, and its closing tags, removed from the text.
fn strip_unbalanced_tags(text: String) -> String {
    let mut stack: Vec<String> = Vec::new();
    for caps in TAG_RE.captures_iter(&text) {
        let name = caps[2].to_lowercase();
        if &caps[1] == "/" {
            if stack.last() == Some(&name) {
                stack.pop();
            }
        } else {
            stack.push(name);
        }
    }

    if stack.is_empty() {
        return text;
    }

    let mut text = text;
    let mut handled = HashSet::new();
    for tag in stack {
        if !handled.insert(tag.clone()) {
            continue;
        }
        let open_re = Regex::new(&format!("<{tag}[^>]*>")).unwrap();
        text = open_re.replace_all(&text, "").into_owned();
        // Orphaned closers of a removed opener would otherwise remain as stray
        // literal text.
        text = text.replace(&format!("</{tag}>"), "");
    }
    text
}
