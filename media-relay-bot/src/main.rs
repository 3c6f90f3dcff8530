//! Binary: serves the webhook or manages its registration with Telegram.

use anyhow::Result;
use clap::Parser;
use media_relay_bot::{load_config, run_bot, run_delete_webhook, run_set_webhook, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { token } => run_bot(load_config(token)?).await,
        Commands::SetWebhook { url, token } => run_set_webhook(load_config(token)?, &url).await,
        Commands::DeleteWebhook { token } => run_delete_webhook(load_config(token)?).await,
    }
}
