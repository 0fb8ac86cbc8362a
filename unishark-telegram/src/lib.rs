//! # unishark-telegram
//!
//! Telegram layer of the UniShark bot: teloxide adapters, the outbound [`unishark_core::Bot`] implementation,
//! config, ingress selection (webhook via axum or long polling), and the single-consumer update dispatcher.
//! No handler logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod dispatcher;
mod ingress;
mod polling;
mod runner;
mod webhook;

pub use adapters::{update_to_message, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{inline_keyboard, TelegramBotAdapter};
pub use config::{TelegramConfig, DEFAULT_PORT};
pub use dispatcher::{update_queue, Dispatcher, UPDATE_QUEUE_CAPACITY};
pub use ingress::{is_local_host, Ingress, IngressMode, WebhookTarget};
pub use polling::run_polling;
pub use runner::{run_bot, shutdown_signal, BotRuntime};
pub use webhook::{serve_webhook, webhook_router};
