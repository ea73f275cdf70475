//! BotConfig: BaseConfig + ServicesConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, ServicesConfig};

/// Full bot config. Call validate() after load to fail fast before init.
pub struct BotConfig {
    pub base: BaseConfig,
    pub services: ServicesConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it
    /// overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let services = ServicesConfig::from_env()?;
        Ok(Self { base, services })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.services.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn services(&self) -> &ServicesConfig {
        &self.services
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
