//! Component factory: builds BotComponents and the AppContext from config. Isolates assembly logic from runner.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::{Bot, Event};
use crate::extractor::{Extractor, ScratchDir, YtDlpExtractor};
use crate::handlers::{AudioCallbackHandler, LoggingHandler, StartHandler, VideoLinkHandler};
use crate::telegram::{build_teloxide_bot, TelegramBotAdapter};

/// Long-lived dependencies, created once at startup.
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub scratch: ScratchDir,
    pub extractor: Arc<dyn Extractor>,
}

/// Everything a request needs: the handler chain wired to the outbound bot. Passed to the webhook as state.
#[derive(Clone)]
pub struct AppContext {
    pub chain: HandlerChain,
}

impl AppContext {
    pub fn new(bot: Arc<dyn Bot>, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            chain: build_handler_chain(bot, extractor),
        }
    }

    /// Runs one event through the chain. Failures end here; they are logged, never returned.
    pub async fn dispatch(&self, event: Event) {
        if let Err(e) = self.chain.handle(&event).await {
            error!(
                error = %e,
                kind = event.kind(),
                chat_id = event.chat().id,
                "Handler chain failed"
            );
        }
    }
}

/// Builds BotComponents: Bot adapter over the teloxide client, scratch store and yt-dlp extractor.
#[instrument(skip(config))]
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config.bot_token(), config.telegram_api_url())?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot));

    let scratch = ScratchDir::new(config.scratch_dir());
    let extractor: Arc<dyn Extractor> = Arc::new(YtDlpExtractor::new(
        config.ytdlp_bin(),
        scratch.clone(),
        config.extract_timeout(),
    ));
    info!(
        ytdlp_bin = %config.ytdlp_bin(),
        scratch_dir = %scratch.root().display(),
        timeout_secs = config.extract_timeout().as_secs(),
        "Extractor ready"
    );

    Ok(BotComponents {
        bot,
        scratch,
        extractor,
    })
}

pub fn build_app_context(components: &BotComponents) -> AppContext {
    AppContext::new(components.bot.clone(), components.extractor.clone())
}

/// Builds the handler chain (logging → /start → audio button → video link).
pub fn build_handler_chain(bot: Arc<dyn Bot>, extractor: Arc<dyn Extractor>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(StartHandler::new(bot.clone())))
        .add_handler(Arc::new(AudioCallbackHandler::new(bot.clone(), extractor.clone())))
        .add_handler(Arc::new(VideoLinkHandler::new(bot, extractor)))
}
