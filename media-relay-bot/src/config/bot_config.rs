//! BotConfig: BaseConfig + DownloadConfig + ServerConfig. Use load() for env-based loading.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use super::{BaseConfig, DownloadConfig, ServerConfig};

/// Bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub download: DownloadConfig,
    pub server: ServerConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let download = DownloadConfig::from_env();
        let server = ServerConfig::from_env();
        Ok(Self {
            base,
            download,
            server,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.download.validate()?;
        self.server.validate()
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn log_file(&self) -> Option<&str> {
        self.base.log_file.as_deref()
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.download.scratch_dir
    }
    pub fn ytdlp_bin(&self) -> &str {
        &self.download.ytdlp_bin
    }
    pub fn extract_timeout(&self) -> Duration {
        self.download.extract_timeout()
    }

    pub fn bind_addr(&self) -> &str {
        &self.server.bind_addr
    }
    pub fn webhook_secret(&self) -> Option<&str> {
        self.server.webhook_secret.as_deref()
    }
}
