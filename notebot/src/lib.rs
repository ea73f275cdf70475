//! # notebot
//!
//! Telegram capture bot: forwards text, photos, and voice notes to a
//! generative model and a transcription service, files the result as Notion
//! pages, and renders model markdown through the safe-HTML converter.
//!
//! **Public API:** [`BotConfig`] + [`run_bot`] for the full bot;
//! [`build_chain`] for driving the handlers with a substitute transport in
//! tests.

pub mod capture;
pub mod chain;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod messages;
pub mod telegram;
pub mod web;

pub use chain::HandlerChain;
pub use cli::{Cli, Commands};
pub use config::{BaseConfig, BotConfig, ServicesConfig};
pub use notebot_core::{Bot, Chat, Handler, HandlerResponse, Message, MessageContent, User};

use anyhow::Result;
use capture::Capture;
use gemini_client::{GeminiClient, GenerativeModel};
use handlers::{CommandHandler, PhotoCaptureHandler, TextCaptureHandler, VoiceCaptureHandler};
use notion_client::{NotionClient, PageWriter};
use speech_client::{SpeechToText, WhisperClient};
use std::sync::Arc;
use telegram::TelegramBotAdapter;
use tracing::info;

/// Builds the handler chain from config, with the given transport. Used by
/// [`run_bot`] and by tests that substitute a mock transport.
pub fn build_chain(config: &BotConfig, bot: Arc<dyn Bot>) -> HandlerChain {
    let services = config.services();

    let gemini = GeminiClient::new(services.gemini_api_key.clone())
        .with_model(services.gemini_model.clone())
        .with_vision_model(services.gemini_vision_model.clone());
    let model: Arc<dyn GenerativeModel> = Arc::new(gemini);

    let stt: Arc<dyn SpeechToText> = Arc::new(match &services.openai_base_url {
        Some(base) => WhisperClient::with_base_url(services.openai_api_key.clone(), base.clone()),
        None => WhisperClient::new(services.openai_api_key.clone()),
    });

    let pages: Arc<dyn PageWriter> = Arc::new(NotionClient::new(
        services.notion_api_key.clone(),
        services.notion_database_id.clone(),
    ));

    let capture = Arc::new(Capture::new(model.clone(), pages));

    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(bot.clone())))
        .add_handler(Arc::new(TextCaptureHandler::new(bot.clone(), capture.clone())))
        .add_handler(Arc::new(PhotoCaptureHandler::new(
            bot.clone(),
            capture.clone(),
            model,
            services.files_dir.clone(),
            services.file_server_url.clone(),
        )))
        .add_handler(Arc::new(VoiceCaptureHandler::new(bot, capture, stt)))
}

/// Runs the bot: tracing, teloxide Bot, handler chain, long-polling REPL.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    notebot_core::init_tracing(config.log_file())?;

    let mut bot = teloxide::Bot::new(config.bot_token());
    if let Some(url) = config.telegram_api_url() {
        bot = bot.set_api_url(reqwest::Url::parse(url)?);
    }

    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let chain = build_chain(&config, adapter);

    info!("Starting notebot long-polling loop");
    telegram::run_repl(bot, chain).await
}
