//! Link → video pipeline: validate, extract, check size, upload with an "audio only" button.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::core::{Bot, Event, Handler, HandlerResponse, Message, Result};
use crate::extractor::{Extractor, MediaArtifact};

use super::link::{audio_action, parse_media_url};
use super::messages::{video_caption, MSG_INVALID_LINK, MSG_PROCESSING_VIDEO, MSG_SENDING_VIDEO};
use super::status::StatusMessage;
use super::{ensure_uploadable, failure_notice, log_failure, VIDEO_NOTICES};

/// Handles plain text messages. Commands and callbacks are left to other handlers.
pub struct VideoLinkHandler {
    bot: Arc<dyn Bot>,
    extractor: Arc<dyn Extractor>,
}

impl VideoLinkHandler {
    pub fn new(bot: Arc<dyn Bot>, extractor: Arc<dyn Extractor>) -> Self {
        Self { bot, extractor }
    }

    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn process(&self, message: &Message, url: &str) -> Result<()> {
        let status = StatusMessage::send(
            self.bot.clone(),
            &message.chat,
            Some(message.id.as_str()),
            MSG_PROCESSING_VIDEO,
        )
        .await?;
        match self.relay(message, url, &status).await {
            Ok(()) => {
                status.delete().await;
                info!("step: video delivered");
            }
            Err(e) => {
                log_failure(&e, url);
                status.fail(failure_notice(&e, &VIDEO_NOTICES)).await;
            }
        }
        Ok(())
    }

    async fn relay(&self, message: &Message, url: &str, status: &StatusMessage) -> Result<()> {
        info!("step: downloading video");
        let artifact = ensure_uploadable(self.extractor.fetch_video(url).await?).await?;
        let sent = self.upload(message, url, status, &artifact).await;
        artifact.discard().await;
        sent
    }

    async fn upload(
        &self,
        message: &Message,
        url: &str,
        status: &StatusMessage,
        artifact: &MediaArtifact,
    ) -> Result<()> {
        status.update(MSG_SENDING_VIDEO).await?;
        let action = audio_action(url);
        if action.is_none() {
            warn!(url = %url, "Link too long for an audio button; sending video without it");
        }

        info!(size = artifact.size(), "step: uploading video");
        self.bot
            .send_video(
                &message.chat,
                artifact.path(),
                &video_caption(artifact.title()),
                action.as_ref(),
                Some(message.id.as_str()),
            )
            .await
    }
}

#[async_trait]
impl Handler for VideoLinkHandler {
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Event::Message(message) = event else {
            return Ok(HandlerResponse::Ignore);
        };
        if message.is_command() || message.content.trim().is_empty() {
            return Ok(HandlerResponse::Ignore);
        }

        let url = match parse_media_url(&message.content) {
            Ok(url) => url,
            Err(e) => {
                info!(chat_id = message.chat.id, reason = %e, "Rejected input");
                self.bot.reply_to(message, MSG_INVALID_LINK).await?;
                return Ok(HandlerResponse::Stop);
            }
        };

        self.process(message, &url).await?;
        Ok(HandlerResponse::Stop)
    }
}
