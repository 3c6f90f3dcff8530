//! Out-of-band tooling: builds the teloxide client and tells Telegram where the webhook lives.

use anyhow::{Context, Result};
use reqwest::Url;
use teloxide::prelude::*;
use tracing::{info, instrument};

/// Creates the teloxide client; `api_url` points it at a self-hosted Bot API server.
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url) => {
            let url = Url::parse(url).with_context(|| format!("Invalid Telegram API URL: {}", url))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Registers `url` as the webhook endpoint for this bot. With `secret_token` set, Telegram sends it back
/// in the `X-Telegram-Bot-Api-Secret-Token` header of every update.
#[instrument(skip(bot, secret_token))]
pub async fn set_webhook(bot: &teloxide::Bot, url: &str, secret_token: Option<&str>) -> Result<()> {
    let url = Url::parse(url).with_context(|| format!("Invalid webhook URL: {}", url))?;
    let mut request = bot.set_webhook(url.clone());
    if let Some(secret) = secret_token {
        request = request.secret_token(secret.to_string());
    }
    request.await.context("Telegram rejected setWebhook")?;
    info!(url = %url, with_secret = secret_token.is_some(), "Webhook registered");
    Ok(())
}

/// Removes the webhook registration.
#[instrument(skip(bot))]
pub async fn delete_webhook(bot: &teloxide::Bot) -> Result<()> {
    bot.delete_webhook()
        .await
        .context("Telegram rejected deleteWebhook")?;
    info!("Webhook removed");
    Ok(())
}
