//! Shared helpers: message builder and a recording Bot.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use unishark_core::{Bot, Chat, Command, Message, Reply, Result, User};

/// Private-chat message from user 42 (first name "Sara") in chat `chat_id`.
pub fn message(chat_id: i64, text: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 42,
            username: Some("sara".to_string()),
            first_name: Some("Sara".to_string()),
            last_name: Some("Khalil".to_string()),
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: text.to_string(),
        command: Command::parse(text),
        created_at: Utc::now(),
    }
}

/// Bot that stores every reply instead of sending it.
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<(i64, Reply)>>,
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(i64, Reply)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        self.sent.lock().unwrap().push((chat.id, reply.clone()));
        Ok(())
    }
}
