//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "media-relay-bot")]
#[command(about = "Telegram bot that downloads linked videos (or just their audio) and sends them back", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the webhook (config from env; token can override BOT_TOKEN).
    Serve {
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Register the public URL Telegram should post updates to. Sends WEBHOOK_SECRET along when set.
    SetWebhook {
        /// Public HTTPS URL of this server, e.g. https://bot.example.com/
        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        token: Option<String>,
    },

    /// Remove the webhook registration.
    DeleteWebhook {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_token() {
        let cli = Cli::try_parse_from(["media-relay-bot", "serve", "--token", "123:abc"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { token: Some(t) } if t == "123:abc"));
    }

    #[test]
    fn test_set_webhook_requires_url() {
        assert!(Cli::try_parse_from(["media-relay-bot", "set-webhook"]).is_err());

        let cli = Cli::try_parse_from([
            "media-relay-bot",
            "set-webhook",
            "-u",
            "https://bot.example.com/",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::SetWebhook { ref url, token: None } if url == "https://bot.example.com/"
        ));
    }

    #[test]
    fn test_parse_delete_webhook() {
        let cli = Cli::try_parse_from(["media-relay-bot", "delete-webhook"]).unwrap();
        assert!(matches!(cli.command, Commands::DeleteWebhook { token: None }));
    }
}
