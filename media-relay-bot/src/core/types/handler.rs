//! Handler trait and transport conversion traits.

use async_trait::async_trait;

use super::{event::Event, user::User};

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific inbound update to a core [`Event`]. `None` when the update is not something the bot handles.
pub trait ToCoreEvent: Send + Sync {
    fn to_core(&self) -> Option<Event>;
}

/// Handler result for the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Event consumed; stop the chain.
    Stop,
    /// Not for this handler, try next.
    Ignore,
}

/// One step of the chain. Handlers run in order until one returns [`HandlerResponse::Stop`].
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, event: &Event) -> crate::core::error::Result<HandlerResponse>;
}
