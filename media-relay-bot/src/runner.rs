//! Entry points behind the CLI subcommands.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::components::{build_app_context, build_bot_components};
use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::telegram::{build_teloxide_bot, delete_webhook, set_webhook};
use crate::webhook::{serve, WebhookState};

/// Time an in-flight request gets after its extraction to finish uploading during shutdown.
const SHUTDOWN_UPLOAD_GRACE: Duration = Duration::from_secs(60);

/// Main entry: validate config, init logging, build components, clear stale scratch files, then serve the webhook.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        bind_addr = %config.bind_addr(),
        telegram_api_url = %config.telegram_api_url().unwrap_or("default"),
        "Starting media relay bot"
    );

    let components = build_bot_components(&config)?;
    match components.scratch.purge().await {
        Ok(removed) if removed > 0 => warn!(removed, "Removed files left over by a previous run"),
        Ok(_) => {}
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Scratch directory {} is not usable",
                    components.scratch.root().display()
                )
            })
        }
    }

    let state = WebhookState::new(
        build_app_context(&components),
        config.webhook_secret().map(str::to_string),
    );
    let drain = config.extract_timeout() + SHUTDOWN_UPLOAD_GRACE;
    serve(state, config.server().socket_addr()?, drain).await
}

/// Points Telegram at `url` (run once per deployment).
pub async fn run_set_webhook(config: BotConfig, url: &str) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;
    let bot = build_teloxide_bot(config.bot_token(), config.telegram_api_url())?;
    set_webhook(&bot, url, config.webhook_secret()).await
}

pub async fn run_delete_webhook(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;
    let bot = build_teloxide_bot(config.bot_token(), config.telegram_api_url())?;
    delete_webhook(&bot).await
}
