//! `/start` handler: welcome message with the user's chat id and a link button to the UniShark website.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::utils::html;
use tokio::sync::RwLock;
use tracing::info;
use unishark_core::{Handler, HandlerResponse, InlineButton, Message, Reply, Result};

pub const START_COMMAND: &str = "start";
pub const WEBSITE_URL: &str = "https://unishark.site";
pub const WEBSITE_BUTTON_LABEL: &str = "Go to UniShark Website";

/// Welcome text (HTML). `first_name` is escaped here; `chat_id` is shown verbatim so the user can copy it.
pub fn welcome_text(first_name: &str, chat_id: i64) -> String {
    format!(
        "<b>👋 Welcome to UniShark Bot, {name}!</b> 🦈\n\n\
         I'm here to help you stay on top of your university tasks. \
         Here is your unique ID to connect me to your account:\n\n\
         🔑 <b>Your Personal Chat ID is:</b> <code>{chat_id}</code>\n\n\
         <b>Action Required:</b>\n\
         1️⃣ Copy the Chat ID above.\n\
         2️⃣ Go to your UniShark settings page.\n\
         3️⃣ Paste the ID into the 'Telegram Chat ID' field.\n\n\
         Once connected, I'll send you instant notifications for:\n\
         - 📝 New Assignments\n\
         - ❓ New Quizzes\n\
         - ⏰ Approaching Deadlines\n\n\
         Good luck with your studies! 🎓",
        name = html::escape(first_name),
        chat_id = chat_id,
    )
}

/// Full welcome reply: HTML text, one website button, no link preview.
pub fn welcome_reply(first_name: &str, chat_id: i64) -> Reply {
    Reply::html(welcome_text(first_name, chat_id))
        .with_button_row(InlineButton::url(WEBSITE_BUTTON_LABEL, WEBSITE_URL))
        .without_link_preview()
}

/// Replies to `/start` (and `/start@<this bot>`); everything else passes through.
pub struct StartHandler {
    bot_username: Arc<RwLock<Option<String>>>,
}

impl StartHandler {
    pub fn new(bot_username: Arc<RwLock<Option<String>>>) -> Self {
        Self { bot_username }
    }
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = &message.command else {
            return Ok(HandlerResponse::Continue);
        };
        if command.name != START_COMMAND {
            return Ok(HandlerResponse::Continue);
        }
        let username = self.bot_username.read().await.clone();
        if !command.is_addressed_to(username.as_deref()) {
            return Ok(HandlerResponse::Continue);
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "User {} (ID: {}) started the bot. Chat ID: {}",
            message.user.full_name(),
            message.user.id,
            message.chat.id
        );

        let first_name = message.user.first_name.as_deref().unwrap_or("there");
        Ok(HandlerResponse::Reply(welcome_reply(
            first_name,
            message.chat.id,
        )))
    }
}
