//! Bot configuration: BaseConfig (Telegram + log) + ServicesConfig (Gemini,
//! transcription, Notion, file server).

mod base;
mod bot_config;
mod services;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use services::ServicesConfig;
