//! The single progress message shown to the user while a request runs.

use std::sync::Arc;

use tracing::warn;

use crate::core::{Bot, Chat, Result};

/// A sent status message that is edited in place and removed once the media is delivered.
pub struct StatusMessage {
    bot: Arc<dyn Bot>,
    chat: Chat,
    id: String,
}

impl StatusMessage {
    /// Posts `text` to `chat`, quoting `reply_to` when given, and keeps hold of the new message.
    pub async fn send(
        bot: Arc<dyn Bot>,
        chat: &Chat,
        reply_to: Option<&str>,
        text: &str,
    ) -> Result<Self> {
        let id = bot.send_message_and_return_id(chat, text, reply_to).await?;
        Ok(Self {
            bot,
            chat: chat.clone(),
            id,
        })
    }

    pub async fn update(&self, text: &str) -> Result<()> {
        self.bot.edit_message(&self.chat, &self.id, text).await
    }

    /// Replaces the status with a terminal failure notice. Transport errors are only logged.
    pub async fn fail(self, notice: &str) {
        if let Err(e) = self.update(notice).await {
            warn!(error = %e, chat_id = self.chat.id, "Failed to show failure notice");
        }
    }

    /// Removes the status after a successful delivery. Transport errors are only logged.
    pub async fn delete(self) {
        if let Err(e) = self.bot.delete_message(&self.chat, &self.id).await {
            warn!(error = %e, chat_id = self.chat.id, "Failed to delete status message");
        }
    }
}
