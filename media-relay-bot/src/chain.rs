//! # Handler chain
//!
//! Runs a sequence of handlers for each inbound event. The first handler that returns Stop ends the chain.

use crate::core::{Event, Handler, HandlerResponse, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of handlers; cheap to clone (handlers are shared).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler (runs in order; first Stop ends the chain).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs handlers in order. Returns Stop if some handler consumed the event, otherwise Continue.
    #[instrument(skip(self, event), fields(kind = event.kind(), chat_id = event.chat().id))]
    pub async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        info!(user_id = event.user().id, "step: handler_chain started");

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(event).await?;
            debug!(
                handler = %handler_name,
                response = ?response,
                "Handler processed"
            );

            if response == HandlerResponse::Stop {
                info!(handler = %handler_name, "step: handler chain stopped by handler");
                return Ok(HandlerResponse::Stop);
            }
        }

        debug!("step: no handler consumed the event");
        Ok(HandlerResponse::Continue)
    }
}

// Tests live in tests/handler_chain_test.rs
