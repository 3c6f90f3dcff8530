//! "Audio only" button: re-extract the link as MP3 and upload it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::core::{Bot, CallbackQuery, Event, Handler, HandlerResponse, Result};
use crate::extractor::{Extractor, MediaArtifact};

use super::link::decode_audio_payload;
use super::messages::{audio_caption, MSG_EXTRACTING_AUDIO, MSG_SENDING_AUDIO};
use super::status::StatusMessage;
use super::{failure_notice, log_failure, AUDIO_NOTICES};

/// Handles callbacks whose payload starts with `audio:`; any other callback is ignored.
pub struct AudioCallbackHandler {
    bot: Arc<dyn Bot>,
    extractor: Arc<dyn Extractor>,
}

impl AudioCallbackHandler {
    pub fn new(bot: Arc<dyn Bot>, extractor: Arc<dyn Extractor>) -> Self {
        Self { bot, extractor }
    }

    #[instrument(skip(self, query), fields(chat_id = query.chat.id))]
    async fn process(&self, query: &CallbackQuery, url: &str) -> Result<()> {
        // Stops the client-side spinner on the button.
        if let Err(e) = self.bot.answer_callback(&query.id).await {
            warn!(error = %e, "Failed to answer callback query");
        }

        let status = StatusMessage::send(
            self.bot.clone(),
            &query.chat,
            query.message_id.as_deref(),
            MSG_EXTRACTING_AUDIO,
        )
        .await?;
        match self.relay(query, url, &status).await {
            Ok(()) => {
                status.delete().await;
                info!("step: audio delivered");
            }
            Err(e) => {
                log_failure(&e, url);
                status.fail(failure_notice(&e, &AUDIO_NOTICES)).await;
            }
        }
        Ok(())
    }

    async fn relay(&self, query: &CallbackQuery, url: &str, status: &StatusMessage) -> Result<()> {
        info!("step: extracting audio");
        let artifact = self.extractor.fetch_audio_only(url).await?;
        let sent = self.upload(query, status, &artifact).await;
        artifact.discard().await;
        sent
    }

    /// Replies to the message that carried the button, when the callback names it.
    async fn upload(
        &self,
        query: &CallbackQuery,
        status: &StatusMessage,
        artifact: &MediaArtifact,
    ) -> Result<()> {
        status.update(MSG_SENDING_AUDIO).await?;
        info!(size = artifact.size(), "step: uploading audio");
        self.bot
            .send_audio(
                &query.chat,
                artifact.path(),
                artifact.title(),
                &audio_caption(artifact.title()),
                query.message_id.as_deref(),
            )
            .await
    }
}

#[async_trait]
impl Handler for AudioCallbackHandler {
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Event::Callback(query) = event else {
            return Ok(HandlerResponse::Ignore);
        };
        let Some(url) = query.data.as_deref().and_then(decode_audio_payload) else {
            return Ok(HandlerResponse::Ignore);
        };

        self.process(query, url).await?;
        Ok(HandlerResponse::Stop)
    }
}
