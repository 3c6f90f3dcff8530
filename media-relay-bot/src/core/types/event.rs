//! Inbound event accepted by the handler chain.

use serde::{Deserialize, Serialize};

use super::{
    chat::Chat,
    message::{CallbackQuery, Message},
    user::User,
};

/// Everything the bot reacts to: a text message or a button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Message(Message),
    Callback(CallbackQuery),
}

impl Event {
    pub fn chat(&self) -> &Chat {
        match self {
            Event::Message(m) => &m.chat,
            Event::Callback(q) => &q.chat,
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Event::Message(m) => &m.user,
            Event::Callback(q) => &q.user,
        }
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Message(_) => "message",
            Event::Callback(_) => "callback",
        }
    }
}
