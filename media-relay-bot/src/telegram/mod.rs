//! Telegram layer: update adapters, Bot implementation, webhook registration.

mod adapters;
mod bot_adapter;
mod registration;

pub use adapters::{TelegramUpdateWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use registration::{build_teloxide_bot, delete_webhook, set_webhook};
