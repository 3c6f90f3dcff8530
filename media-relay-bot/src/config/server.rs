//! Webhook listener settings.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// BIND_ADDR
    pub bind_addr: String,
    /// WEBHOOK_SECRET; when set, updates must carry it in `X-Telegram-Bot-Api-Secret-Token`
    pub webhook_secret: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let webhook_secret = env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty());
        Self {
            bind_addr,
            webhook_secret,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if let Some(ref secret) = self.webhook_secret {
            // Telegram allows 1-256 characters from A-Z, a-z, 0-9, `_` and `-`.
            let valid = secret.len() <= 256
                && secret
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid {
                anyhow::bail!("WEBHOOK_SECRET must be 1-256 characters of A-Z, a-z, 0-9, _ or -");
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a valid socket address: {}", self.bind_addr))
    }
}
