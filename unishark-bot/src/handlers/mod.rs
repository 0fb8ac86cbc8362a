//! Bot handlers: `/start` welcome and text triggers.

mod start;
mod triggers;

use std::sync::Arc;

use handler_chain::HandlerChain;
use tokio::sync::RwLock;

pub use start::{
    welcome_reply, welcome_text, StartHandler, START_COMMAND, WEBSITE_BUTTON_LABEL, WEBSITE_URL,
};
pub use triggers::{
    default_rules, TriggerHandler, TriggerMatch, TriggerRule, HARFOUSH_RESPONSE, HARFOUSH_TRIGGER,
    INSULT_RESPONSE, INSULT_TRIGGER,
};

/// The bot's chain: `/start` first, then text triggers.
pub fn build_handler_chain(bot_username: Arc<RwLock<Option<String>>>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(StartHandler::new(bot_username)))
        .add_handler(Arc::new(TriggerHandler::default()))
}
