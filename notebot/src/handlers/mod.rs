//! Message handlers: commands plus the text/photo/voice capture flows.
//!
//! Each capture handler owns one content type and follows the same turn shape:
//! placeholder, typing indicator, work, edit the placeholder with the result.
//! Failures after the placeholder are logged and leave it unedited.

mod command;
mod photo;
mod text;
mod voice;

pub use command::CommandHandler;
pub use photo::PhotoCaptureHandler;
pub use text::TextCaptureHandler;
pub use voice::VoiceCaptureHandler;

/// Logs an error and its cause chain. First item with `first_msg`, rest with
/// "Caused by".
pub(crate) fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
    for (i, cause) in e.chain().enumerate() {
        if i == 0 {
            tracing::error!(cause = %cause, "{}", first_msg);
        } else {
            tracing::error!(cause = %cause, "Caused by");
        }
    }
}
