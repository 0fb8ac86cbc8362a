//! Outbound messaging abstraction.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in `unishark-telegram`.

use crate::error::Result;
use crate::types::{Chat, Message, Reply};
use async_trait::async_trait;

/// Sends replies back to the messaging platform. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply (text, parse mode, inline buttons) to the given chat.
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()>;

    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send_reply(chat, &Reply::text(text)).await
    }

    /// Sends a reply into the chat the message came from.
    async fn reply_to(&self, message: &Message, reply: &Reply) -> Result<()> {
        self.send_reply(&message.chat, reply).await
    }
}
