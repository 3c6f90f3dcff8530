//! Mock implementation of [`media_relay_bot::Bot`] for integration tests.
//!
//! Every call is recorded as a [`BotCall`] and sent over an unbounded channel so tests can assert on the
//! exact sequence of chat operations without hitting Telegram.

use async_trait::async_trait;
use media_relay_bot::{Bot, Chat, InlineAction, Message, RelayError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Id returned by `send_message_and_return_id`.
pub const STATUS_ID: &str = "100";

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum BotCall {
    Reply { chat_id: i64, reply_to: String, text: String },
    SendStatus { chat_id: i64, reply_to: Option<String>, text: String },
    Edit { chat_id: i64, message_id: String, text: String },
    Delete { chat_id: i64, message_id: String },
    Video {
        chat_id: i64,
        path: PathBuf,
        /// Whether the file was on disk when the upload started.
        file_present: bool,
        caption: String,
        button: Option<InlineAction>,
        reply_to: Option<String>,
    },
    Audio {
        chat_id: i64,
        path: PathBuf,
        file_present: bool,
        title: String,
        caption: String,
        reply_to: Option<String>,
    },
    AnswerCallback { id: String },
}

/// Mock Bot that records calls; uploads or edits can be made to fail to exercise transport errors.
pub struct MockBot {
    calls: mpsc::UnboundedSender<BotCall>,
    fail_uploads: bool,
    fail_edits: bool,
}

impl MockBot {
    fn build(fail_uploads: bool, fail_edits: bool) -> (Arc<Self>, mpsc::UnboundedReceiver<BotCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bot = Arc::new(Self {
            calls: tx,
            fail_uploads,
            fail_edits,
        });
        (bot, rx)
    }

    /// Creates a MockBot and returns the receiver for call records.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<BotCall>) {
        Self::build(false, false)
    }

    /// Like [`MockBot::with_receiver`], but `send_video` / `send_audio` record the call and then fail.
    pub fn with_failing_uploads() -> (Arc<Self>, mpsc::UnboundedReceiver<BotCall>) {
        Self::build(true, false)
    }

    /// Like [`MockBot::with_receiver`], but `edit_message` records the call and then fails.
    pub fn with_failing_edits() -> (Arc<Self>, mpsc::UnboundedReceiver<BotCall>) {
        Self::build(false, true)
    }

    fn record(&self, call: BotCall) {
        let _ = self.calls.send(call);
    }

    fn outcome(fail: bool, what: &str) -> Result<()> {
        if fail {
            Err(RelayError::Transport(format!("{} rejected", what)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(BotCall::Reply {
            chat_id: message.chat.id,
            reply_to: message.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_and_return_id(
        &self,
        chat: &Chat,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<String> {
        self.record(BotCall::SendStatus {
            chat_id: chat.id,
            reply_to: reply_to.map(str::to_string),
            text: text.to_string(),
        });
        Ok(STATUS_ID.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(BotCall::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Self::outcome(self.fail_edits, "edit")
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        self.record(BotCall::Delete {
            chat_id: chat.id,
            message_id: message_id.to_string(),
        });
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
        self.record(BotCall::Video {
            chat_id: chat.id,
            path: video.to_path_buf(),
            file_present: video.exists(),
            caption: caption.to_string(),
            button: action.cloned(),
            reply_to: reply_to.map(str::to_string),
        });
        Self::outcome(self.fail_uploads, "upload")
    }

    async fn send_audio(
        &self,
        chat: &Chat,
        audio: &Path,
        title: &str,
        caption: &str,
        reply_to: Option<&str>,
    ) -> Result<()> {
        self.record(BotCall::Audio {
            chat_id: chat.id,
            path: audio.to_path_buf(),
            file_present: audio.exists(),
            title: title.to_string(),
            caption: caption.to_string(),
            reply_to: reply_to.map(str::to_string),
        });
        Self::outcome(self.fail_uploads, "upload")
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.record(BotCall::AnswerCallback {
            id: callback_id.to_string(),
        });
        Ok(())
    }
}

/// Drains every call recorded so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<BotCall>) -> Vec<BotCall> {
    let mut calls = Vec::new();
    while let Ok(call) = rx.try_recv() {
        calls.push(call);
    }
    calls
}
