//! First link of the chain: records every inbound event and lets it through.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::{Event, Handler, HandlerResponse, Result};

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, event))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        match event {
            Event::Message(message) => info!(
                user_id = message.user.id,
                username = %message.user.username.as_deref().unwrap_or("unknown"),
                chat_id = message.chat.id,
                message_content = %message.content,
                "Received message"
            ),
            Event::Callback(query) => info!(
                user_id = query.user.id,
                chat_id = query.chat.id,
                data = %query.data.as_deref().unwrap_or(""),
                "Received callback"
            ),
        }
        Ok(HandlerResponse::Continue)
    }
}
