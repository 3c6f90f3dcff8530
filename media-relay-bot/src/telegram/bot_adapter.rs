//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use crate::core::{parse_message_id, Bot as CoreBot, Chat, InlineAction, Message, RelayError, Result};
use async_trait::async_trait;
use std::path::Path;
use teloxide::{
    prelude::*,
    types::{
        CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId,
        ReplyParameters,
    },
};
use tracing::debug;

fn transport(e: teloxide::RequestError) -> RelayError {
    RelayError::Transport(e.to_string())
}

fn reply_parameters(message_id: &str) -> Result<ReplyParameters> {
    Ok(ReplyParameters::new(MessageId(parse_message_id(message_id)?)))
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(reply_parameters(&message.id)?)
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn send_message_and_return_id(
        &self,
        chat: &Chat,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<String> {
        let mut request = self.bot.send_message(ChatId(chat.id), text.to_string());
        if let Some(id) = reply_to {
            request = request.reply_parameters(reply_parameters(id)?);
        }
        let sent = request.await.map_err(transport)?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn send_video(
        &self,
        chat: &Chat,
        video: &Path,
        caption: &str,
        action: Option<&InlineAction>,
        reply_to: Option<&str>,
    ) -> Result<()> {
        debug!(chat_id = chat.id, path = %video.display(), "Uploading video");
        let mut request = self
            .bot
            .send_video(ChatId(chat.id), InputFile::file(video.to_path_buf()))
            .caption(caption.to_string());
        if let Some(action) = action {
            request = request.reply_markup(InlineKeyboardMarkup::new(vec![vec![
                InlineKeyboardButton::callback(action.label.clone(), action.payload.clone()),
            ]]));
        }
        if let Some(id) = reply_to {
            request = request.reply_parameters(reply_parameters(id)?);
        }
        request.await.map_err(transport)?;
        Ok(())
    }

    async fn send_audio(
        &self,
        chat: &Chat,
        audio: &Path,
        title: &str,
        caption: &str,
        reply_to: Option<&str>,
    ) -> Result<()> {
        debug!(chat_id = chat.id, path = %audio.display(), "Uploading audio");
        let mut request = self
            .bot
            .send_audio(ChatId(chat.id), InputFile::file(audio.to_path_buf()))
            .title(title.to_string())
            .caption(caption.to_string());
        if let Some(id) = reply_to {
            request = request.reply_parameters(reply_parameters(id)?);
        }
        request.await.map_err(transport)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await
            .map_err(transport)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const SENT_MESSAGE: &str = r#"{"ok":true,"result":{"message_id":100,"date":1700000000,"chat":{"id":42,"type":"private","first_name":"Ann"},"from":{"id":1,"is_bot":true,"first_name":"Relay"},"text":"status"}}"#;

    fn adapter(server: &mockito::Server) -> TelegramBotAdapter {
        let bot = teloxide::Bot::new("123:abc").set_api_url(reqwest::Url::parse(&server.url()).unwrap());
        TelegramBotAdapter::new(bot)
    }

    /// **Test: a status message with a reply target quotes that message and returns the new id.**
    #[tokio::test]
    async fn test_status_message_replies_to_target() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(r"(?i)^/bot123:abc/sendmessage$".to_string()))
            .match_body(Matcher::PartialJson(json!({
                "chat_id": 42,
                "text": "status",
                "reply_parameters": { "message_id": 11 }
            })))
            .with_header("content-type", "application/json")
            .with_body(SENT_MESSAGE)
            .create_async()
            .await;

        let id = adapter(&server)
            .send_message_and_return_id(&Chat::private(42), "status", Some("11"))
            .await
            .unwrap();
        assert_eq!(id, "100");
        mock.assert_async().await;
    }

    /// **Test: an edit the Bot API refuses surfaces as a transport error.**
    #[tokio::test]
    async fn test_rejected_edit_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Regex(r"(?i)^/bot123:abc/editmessagetext$".to_string()))
            .match_body(Matcher::PartialJson(json!({ "chat_id": 42, "message_id": 100 })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: message to edit not found"}"#)
            .create_async()
            .await;

        let err = adapter(&server)
            .edit_message(&Chat::private(42), "100", "sending")
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Transport(_)));
    }

    #[tokio::test]
    async fn test_bad_reply_target_fails_before_request() {
        let server = mockito::Server::new_async().await;
        let err = adapter(&server)
            .send_message_and_return_id(&Chat::private(42), "status", Some("not-an-id"))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Transport(_)));
    }
}
