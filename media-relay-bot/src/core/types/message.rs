//! Inbound text message and button-press callback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A text message sent by a user to the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text; empty for non-text messages.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the text is a bot command (`/start`, `/help@my_bot`, ...).
    pub fn is_command(&self) -> bool {
        self.content.trim_start().starts_with('/')
    }

    /// Command name without the leading `/` and any `@botname` suffix.
    pub fn command(&self) -> Option<&str> {
        let text = self.content.trim_start().strip_prefix('/')?;
        let word = text.split_whitespace().next().unwrap_or("");
        Some(word.split('@').next().unwrap_or(word))
    }
}

/// Activation of an inline button. `data` is the opaque payload attached to the button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Provider id of the query; used to acknowledge it.
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Id of the message carrying the button, when still accessible.
    pub message_id: Option<String>,
    pub data: Option<String>,
}
