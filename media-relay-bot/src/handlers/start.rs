//! Greeting for `/start` (and `/help`).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::core::{Bot, Event, Handler, HandlerResponse, Result};

use super::messages::MSG_START;

pub struct StartHandler {
    bot: Arc<dyn Bot>,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Event::Message(message) = event else {
            return Ok(HandlerResponse::Ignore);
        };
        match message.command() {
            Some("start") | Some("help") => {
                info!(chat_id = message.chat.id, "step: greeting");
                self.bot.reply_to(message, MSG_START).await?;
                Ok(HandlerResponse::Stop)
            }
            _ => Ok(HandlerResponse::Ignore),
        }
    }
}
