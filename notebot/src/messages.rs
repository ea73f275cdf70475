//! User-facing message strings and fixed model prompts.

/// /start reply (HTML).
pub const WELCOME_MESSAGE: &str = "Hi! I save what you send me to Notion.\n\n\
Send me <b>text</b>, a <b>photo</b>, or a <b>voice message</b> and I will file it \
as a page with a summary and tags.\n\nUse /help for details.";

/// /help reply (HTML).
pub const HELP_MESSAGE: &str = "<b>What I can do</b>\n\
- Text: saved as a page; links in the text are fetched and attached.\n\
- Photos: captioned or transcribed, saved with the image.\n\
- Voice: transcribed and saved.\n\n\
Every page gets a model-written summary and tags.";

/// Placeholder sent at the start of a turn, edited with the result.
pub const PLACEHOLDER: &str = "...";

/// Prompt for photo captures.
pub const VISION_PROMPT: &str = "If image have text, transcribe it, otherwise describe it.";

/// Filename for in-memory voice uploads; the extension drives the decoder.
pub const VOICE_FILENAME: &str = "voice.oga";
