//! Wraps teloxide::Bot and implements [`unishark_core::Bot`]. Production code sends replies via Telegram;
//! tests substitute another Bot impl.

use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, LinkPreviewOptions};
use tracing::debug;
use unishark_core::{Bot as CoreBot, BotError, Chat, InlineButton, ParseMode, Reply, Result};
use url::Url;

/// Thin wrapper around teloxide::Bot that implements the core Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Builds an inline keyboard of URL buttons. A button whose URL does not parse is a transport error.
pub fn inline_keyboard(rows: &[Vec<InlineButton>]) -> Result<InlineKeyboardMarkup> {
    let rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| {
                    let url = Url::parse(&button.url).map_err(|e| {
                        BotError::Transport(format!("Invalid button url {}: {}", button.url, e))
                    })?;
                    Ok(InlineKeyboardButton::url(button.label.clone(), url))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(InlineKeyboardMarkup::new(rows))
}

fn disabled_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat.id), reply.text.clone());
        if reply.parse_mode == ParseMode::Html {
            request = request.parse_mode(teloxide::types::ParseMode::Html);
        }
        if !reply.buttons.is_empty() {
            request = request.reply_markup(inline_keyboard(&reply.buttons)?);
        }
        if reply.disable_link_preview {
            request = request.link_preview_options(disabled_link_preview());
        }

        let sent = request
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        debug!(chat_id = chat.id, message_id = sent.id.0, "Reply sent");
        Ok(())
    }
}
