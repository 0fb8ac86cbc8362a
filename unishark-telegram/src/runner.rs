//! Runtime wiring: builds the Telegram client and outbound adapter from config, selects the ingress once,
//! then runs ingress and dispatcher until interrupted.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use teloxide::requests::Requester;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use unishark_core::Bot;
use url::Url;

use crate::bot_adapter::TelegramBotAdapter;
use crate::config::TelegramConfig;
use crate::dispatcher::{update_queue, Dispatcher};
use crate::ingress::{Ingress, IngressMode};
use crate::polling::run_polling;
use crate::webhook::serve_webhook;

/// Explicit runtime context: Telegram client, outbound Bot, selected ingress, cached bot username.
pub struct BotRuntime {
    bot: teloxide::Bot,
    outbound: Arc<dyn Bot>,
    ingress: Ingress,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl BotRuntime {
    /// Validates `config` and selects the ingress. No network calls are made here.
    pub fn new(config: TelegramConfig, mode: IngressMode) -> Result<Self> {
        config.validate()?;
        let ingress = Ingress::select(&config, mode)?;

        let mut bot = teloxide::Bot::new(config.bot_token.clone());
        if let Some(api_url) = &config.telegram_api_url {
            let url = Url::parse(api_url).context("TELEGRAM_API_URL")?;
            bot = bot.set_api_url(url);
        }
        let outbound: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));

        Ok(Self {
            bot,
            outbound,
            ingress,
            bot_username: Arc::new(RwLock::new(None)),
        })
    }

    pub fn ingress(&self) -> &Ingress {
        &self.ingress
    }

    /// Shared cache of the bot's username, filled by [`BotRuntime::run`] before ingress starts.
    pub fn bot_username(&self) -> Arc<RwLock<Option<String>>> {
        self.bot_username.clone()
    }

    /// Fetches the bot username via getMe. Failure is logged; commands then accept any @mention.
    async fn refresh_bot_username(&self) {
        match self.bot.get_me().await {
            Ok(me) => {
                if let Some(username) = &me.user.username {
                    *self.bot_username.write().await = Some(username.clone());
                    info!(username = %username, "Bot username set");
                }
            }
            Err(e) => warn!(error = %e, "getMe failed, bot username unknown"),
        }
    }

    /// Runs ingress and dispatcher until `shutdown` resolves. Webhook registration or clearing failures
    /// are returned as errors; by then the dispatcher has drained and stopped.
    ///
    /// `shutdown` is polled on its own task before any network call, so a signal listener it installs is
    /// live during startup. A shutdown that resolves during startup skips the ingress entirely.
    #[instrument(skip_all, fields(webhook = self.ingress.is_webhook()))]
    pub async fn run<S>(self, chain: HandlerChain, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let shutdown_task = tokio::spawn(shutdown);
        let shutdown_abort = shutdown_task.abort_handle();
        tokio::task::yield_now().await;

        self.refresh_bot_username().await;

        let (tx, rx) = update_queue();
        let dispatcher = Dispatcher::new(chain, self.outbound.clone());
        let worker = tokio::spawn(dispatcher.run(rx));

        let ingress_result = if shutdown_task.is_finished() {
            warn!("Shutdown requested during startup, ingress not started");
            drop(tx);
            Ok(())
        } else {
            let shutdown = async move {
                let _ = shutdown_task.await;
            };
            match &self.ingress {
                Ingress::Webhook(target) => {
                    info!(port = target.listen_addr.port(), "Starting bot in webhook mode");
                    serve_webhook(&self.bot, target, tx, shutdown).await
                }
                Ingress::Polling => {
                    info!("Starting bot in long polling mode");
                    run_polling(self.bot.clone(), tx, shutdown).await
                }
            }
        };
        shutdown_abort.abort();

        worker.await.context("dispatcher task failed")?;

        if let Err(e) = &ingress_result {
            error!(error = %e, "Ingress failed");
        }
        ingress_result?;
        info!("Bot stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received, shutting down"),
        Err(e) => error!(error = %e, "Failed to listen for interrupt"),
    }
}

/// Main entry: builds the runtime, lets `make_chain` build handlers with the bot-username cache, runs until Ctrl-C.
#[instrument(skip(config, make_chain))]
pub async fn run_bot<F>(config: TelegramConfig, mode: IngressMode, make_chain: F) -> Result<()>
where
    F: FnOnce(Arc<RwLock<Option<String>>>) -> HandlerChain,
{
    let runtime = BotRuntime::new(config, mode)?;
    let chain = make_chain(runtime.bot_username());
    info!(handlers = chain.len(), "Bot initialized");
    runtime.run(chain, shutdown_signal()).await
}
