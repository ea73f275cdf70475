//! REPL runner: converts teloxide messages to core messages (downloading
//! photo/voice bytes up front) and passes them to the HandlerChain, spawned
//! per update so the polling loop never blocks on a slow turn.

use crate::chain::HandlerChain;
use anyhow::Result;
use chrono::Utc;
use notebot_core::{Chat, Message as CoreMessage, MessageContent, User};
use std::io::Cursor;
use teloxide::{net::Download, prelude::*, types::FileId};
use tracing::{error, info, instrument};

/// Starts the long-polling REPL with the given teloxide Bot and HandlerChain.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let chain = handler_chain;
    teloxide::repl(
        bot,
        move |bot: Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();

            async move {
                let core_msg = match to_core_message(&bot, &msg).await {
                    Ok(m) => m,
                    Err(e) => {
                        error!(error = %e, chat_id = msg.chat.id.0, "Failed to convert incoming message");
                        return Ok(());
                    }
                };

                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    content = content_kind(&core_msg.content),
                    "Received message"
                );

                // Run the chain in a spawned task so the REPL returns immediately.
                tokio::spawn(async move {
                    if let Err(e) = chain.handle(&core_msg).await {
                        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                    }
                });

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}

fn content_kind(content: &MessageContent) -> &'static str {
    match content {
        MessageContent::Text(_) => "text",
        MessageContent::Photo(_) => "photo",
        MessageContent::Voice(_) => "voice",
        MessageContent::Unsupported => "unsupported",
    }
}

/// Converts a teloxide message to a core message, downloading media bytes.
/// The largest photo size is the last element of the photo array.
async fn to_core_message(
    bot: &teloxide::Bot,
    msg: &teloxide::types::Message,
) -> Result<CoreMessage> {
    let content = if let Some(text) = msg.text() {
        MessageContent::Text(text.to_string())
    } else if let Some(photo) = msg.photo().and_then(|sizes| sizes.last()) {
        MessageContent::Photo(download_file(bot, &photo.file.id).await?)
    } else if let Some(voice) = msg.voice() {
        MessageContent::Voice(download_file(bot, &voice.file.id).await?)
    } else {
        MessageContent::Unsupported
    };

    let user = msg
        .from
        .as_ref()
        .map(|u| User {
            id: u.id.0 as i64,
            username: u.username.clone(),
            first_name: Some(u.first_name.clone()),
            last_name: u.last_name.clone(),
        })
        .unwrap_or(User {
            id: 0,
            username: None,
            first_name: None,
            last_name: None,
        });

    Ok(CoreMessage {
        id: msg.id.to_string(),
        user,
        chat: Chat {
            id: msg.chat.id.0,
            chat_type: chat_type(&msg.chat),
        },
        content,
        created_at: Utc::now(),
    })
}

fn chat_type(chat: &teloxide::types::Chat) -> String {
    if chat.is_private() {
        "private".to_string()
    } else if chat.is_group() || chat.is_supergroup() {
        "group".to_string()
    } else {
        "channel".to_string()
    }
}

/// Downloads a Telegram file into memory.
async fn download_file(bot: &teloxide::Bot, file_id: &FileId) -> Result<Vec<u8>> {
    let file = bot.get_file(file_id.clone()).await?;
    let mut buf = Cursor::new(Vec::new());
    bot.download_file(&file.path, &mut buf).await?;
    Ok(buf.into_inner())
}
