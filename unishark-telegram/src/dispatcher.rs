//! Update dispatcher: the single consumer of the update queue. Converts each update into a core message,
//! runs the handler chain, and sends at most one reply through the outbound [`Bot`].

use std::sync::Arc;

use handler_chain::HandlerChain;
use teloxide::types::Update;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use unishark_core::{Bot, HandlerResponse, Message, Result};

use crate::adapters::update_to_message;

/// Capacity of the queue between ingress and dispatcher.
pub const UPDATE_QUEUE_CAPACITY: usize = 128;

/// Creates the update queue: ingress holds the sender, the dispatcher drains the receiver.
pub fn update_queue() -> (mpsc::Sender<Update>, mpsc::Receiver<Update>) {
    mpsc::channel(UPDATE_QUEUE_CAPACITY)
}

#[derive(Clone)]
pub struct Dispatcher {
    chain: HandlerChain,
    bot: Arc<dyn Bot>,
}

impl Dispatcher {
    pub fn new(chain: HandlerChain, bot: Arc<dyn Bot>) -> Self {
        Self { chain, bot }
    }

    /// Runs the chain for one message and sends the reply, if any. Returns whether a reply was sent.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    pub async fn dispatch(&self, message: &Message) -> Result<bool> {
        match self.chain.handle(message).await? {
            HandlerResponse::Reply(reply) => {
                self.bot.reply_to(message, &reply).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Handles one update. Errors are logged and swallowed; nothing is retried.
    pub async fn dispatch_update(&self, update: &Update) {
        let Some(message) = update_to_message(update) else {
            debug!(update_id = update.id.0, "Skipping non-message update");
            return;
        };

        info!(
            update_id = update.id.0,
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_content = %message.content,
            "Received message"
        );

        match self.dispatch(&message).await {
            Ok(true) => debug!(chat_id = message.chat.id, "Reply delivered"),
            Ok(false) => debug!(chat_id = message.chat.id, "No handler replied"),
            Err(e) => error!(
                error = %e,
                update_id = update.id.0,
                chat_id = message.chat.id,
                "Failed to handle update"
            ),
        }
    }

    /// Drains the queue one update at a time, in arrival order, until every sender is dropped.
    pub async fn run(self, mut updates: mpsc::Receiver<Update>) {
        info!("Dispatcher started");
        while let Some(update) = updates.recv().await {
            self.dispatch_update(&update).await;
        }
        info!("Dispatcher stopped, update queue closed");
    }
}
