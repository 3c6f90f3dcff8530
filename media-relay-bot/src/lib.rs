//! # Media relay bot
//!
//! Telegram bot behind a webhook: a user sends a video link, the bot downloads it with yt-dlp and sends
//! the video back with an "audio only" button that re-extracts the same link as MP3.
//!
//! Layers: `webhook` (axum) → `telegram` adapters → `chain` of `handlers` → `extractor` (yt-dlp) and
//! the outbound `core::Bot`.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod extractor;
pub mod handlers;
pub mod runner;
pub mod telegram;
pub mod webhook;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, parse_message_id, Bot, CallbackQuery, Chat, DownloadRequest, Event,
    ExtractionError, Handler, HandlerResponse, InlineAction, MediaKind, Message, RelayError,
    Result, ToCoreEvent, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use extractor::{Extractor, MediaArtifact, ScratchDir, YtDlpExtractor};

pub use telegram::{
    build_teloxide_bot, delete_webhook, set_webhook, TelegramBotAdapter, TelegramUpdateWrapper,
    TelegramUserWrapper,
};

pub use config::{BaseConfig, BotConfig, DownloadConfig, ServerConfig};
pub use runner::{run_bot, run_delete_webhook, run_set_webhook};

pub use components::{build_app_context, build_bot_components, build_handler_chain, AppContext, BotComponents};
pub use handlers::{AudioCallbackHandler, LoggingHandler, StartHandler, VideoLinkHandler};
pub use webhook::{router, serve, serve_with_shutdown, WebhookState};
