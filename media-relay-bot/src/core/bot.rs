//! Bot abstraction for the chat side of a request.
//!
//! [`Bot`] is transport-agnostic; [`crate::telegram::TelegramBotAdapter`] implements it via teloxide.

use crate::core::error::{RelayError, Result};
use crate::core::types::{Chat, InlineAction, Message};
use async_trait::async_trait;
use std::path::Path;

/// Everything the handlers need from the messaging platform. Every failure is a [`RelayError::Transport`].
///
/// `reply_to` is the id of a message in the same chat that the outgoing message quotes.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply quoting the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a message and returns its id for later `edit_message` / `delete_message`.
    async fn send_message_and_return_id(
        &self,
        chat: &Chat,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<String>;
    /// Replaces the text of an already-sent message. `message_id` is transport-specific (Telegram numeric string).
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Deletes an already-sent message.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
    /// Uploads a local video file with a caption and an optional inline button.
    async fn send_video(
        &self,
        chat: &Chat,
        video: &Path,
        caption: &str,
        action: Option<&InlineAction>,
        reply_to: Option<&str>,
    ) -> Result<()>;
    /// Uploads a local audio file with track title and caption.
    async fn send_audio(
        &self,
        chat: &Chat,
        audio: &Path,
        title: &str,
        caption: &str,
        reply_to: Option<&str>,
    ) -> Result<()>;
    /// Acknowledges a button press so the client stops showing a spinner.
    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit, delete and reply targets.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| RelayError::Transport(format!("Invalid message_id: {}", s)))
}
