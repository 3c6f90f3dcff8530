//! Adapters from Telegram (teloxide) types to core types.

use crate::core::{CallbackQuery, Chat, Event, Message, ToCoreEvent, ToCoreUser, User};
use teloxide::types::UpdateKind;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
        }
    }
}

/// Wraps a teloxide Update for conversion to a core [`Event`].
///
/// Text messages become [`Event::Message`] (non-text messages carry empty content), button presses
/// become [`Event::Callback`]; every other update kind is dropped.
pub struct TelegramUpdateWrapper<'a>(pub &'a teloxide::types::Update);

impl ToCoreEvent for TelegramUpdateWrapper<'_> {
    fn to_core(&self) -> Option<Event> {
        match &self.0.kind {
            UpdateKind::Message(msg) => Some(Event::Message(message_to_core(msg))),
            UpdateKind::CallbackQuery(query) => {
                let origin = query.message.as_ref()?;
                Some(Event::Callback(CallbackQuery {
                    id: query.id.0.clone(),
                    user: TelegramUserWrapper(&query.from).to_core(),
                    chat: chat_to_core(origin.chat()),
                    message_id: Some(origin.id().to_string()),
                    data: query.data.clone(),
                }))
            }
            _ => None,
        }
    }
}

fn message_to_core(msg: &teloxide::types::Message) -> Message {
    Message {
        id: msg.id.to_string(),
        user: msg
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or_default(),
        chat: chat_to_core(&msg.chat),
        content: msg.text().unwrap_or("").to_string(),
        created_at: msg.date,
    }
}

fn chat_to_core(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "channel"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}
