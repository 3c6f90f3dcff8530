//! Core types: user, chat, inbound events, media requests, and the Handler trait.
//!
//! One file per main type.

mod chat;
mod event;
mod handler;
mod media;
mod message;
mod user;

pub use chat::Chat;
pub use event::Event;
pub use handler::{Handler, HandlerResponse, ToCoreEvent, ToCoreUser};
pub use media::{DownloadRequest, InlineAction, MediaKind};
pub use message::{CallbackQuery, Message};
pub use user::User;
