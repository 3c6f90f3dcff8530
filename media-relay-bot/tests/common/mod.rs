//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod mock_bot;
pub mod mock_extractor;

use chrono::Utc;
use media_relay_bot::{CallbackQuery, Chat, Event, Message, User};

pub const CHAT_ID: i64 = 42;

fn user() -> User {
    User {
        id: 7,
        username: Some("ann".to_string()),
        first_name: Some("Ann".to_string()),
    }
}

/// Text message from user 7 in private chat 42.
pub fn text_event(text: &str) -> Event {
    Event::Message(Message {
        id: "10".to_string(),
        user: user(),
        chat: Chat::private(CHAT_ID),
        content: text.to_string(),
        created_at: Utc::now(),
    })
}

/// Button press in chat 42 carrying `data`.
pub fn callback_event(data: &str) -> Event {
    Event::Callback(CallbackQuery {
        id: "cbq-1".to_string(),
        user: user(),
        chat: Chat::private(CHAT_ID),
        message_id: Some("11".to_string()),
        data: Some(data.to_string()),
    })
}
