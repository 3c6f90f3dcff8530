//! Core types and traits: Handler, Bot, Event, error, logger. Transport-agnostic.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{ExtractionError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    CallbackQuery, Chat, DownloadRequest, Event, Handler, HandlerResponse, InlineAction, MediaKind,
    Message, ToCoreEvent, ToCoreUser, User,
};
