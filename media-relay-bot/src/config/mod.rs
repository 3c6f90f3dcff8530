//! Bot configuration: BaseConfig (Telegram + log) + DownloadConfig (extraction) + ServerConfig (webhook listener).

mod base;
mod bot_config;
mod download;
mod server;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use download::DownloadConfig;
pub use server::ServerConfig;
