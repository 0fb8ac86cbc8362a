//! Mock implementation of [`unishark_core::Bot`] for integration tests.
//!
//! Records every `send_reply` call so tests can assert on what would have been sent to Telegram.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use unishark_core::{Bot, BotError, Chat, Reply, Result};

/// One recorded call to `send_reply(chat, reply)`.
#[derive(Debug, Clone)]
pub struct SentReply {
    pub chat_id: i64,
    pub reply: Reply,
}

/// Mock Bot that forwards each reply to a channel; can be told to fail every send.
pub struct MockBot {
    sent_tx: mpsc::UnboundedSender<SentReply>,
    fail: bool,
}

impl MockBot {
    /// Creates a recording MockBot and returns the receiver for sent replies.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<SentReply>) {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        (Arc::new(Self { sent_tx, fail: false }), sent_rx)
    }

    /// Creates a MockBot whose sends all fail with a transport error (attempts are still recorded).
    pub fn failing() -> (Arc<Self>, mpsc::UnboundedReceiver<SentReply>) {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        (Arc::new(Self { sent_tx, fail: true }), sent_rx)
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        let _ = self.sent_tx.send(SentReply {
            chat_id: chat.id,
            reply: reply.clone(),
        });
        if self.fail {
            return Err(BotError::Transport("mock send failure".to_string()));
        }
        Ok(())
    }
}
