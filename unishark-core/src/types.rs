//! Core types: user, chat, command, message, outbound reply, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// First and last name joined with a space; falls back to username, then to the numeric id.
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self
                .username
                .clone()
                .unwrap_or_else(|| self.id.to_string()),
        }
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A bot command parsed from message text: `/name[@mention] [args]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    /// Bot username after `@`, if the command was addressed explicitly.
    pub mention: Option<String>,
    pub args: String,
}

impl Command {
    /// Parses `text` as a command. Returns None unless the text starts with `/` followed by a name.
    /// The name is lowercased, so `/Start` and `/START` both parse as `start`.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix('/')?;
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention.to_string())),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_lowercase(),
            mention,
            args: args.to_string(),
        })
    }

    /// True when the command has no mention, or the mention equals `bot_username` (case-insensitive).
    /// An unknown bot username accepts every mention.
    pub fn is_addressed_to(&self, bot_username: Option<&str>) -> bool {
        match (&self.mention, bot_username) {
            (None, _) | (Some(_), None) => true,
            (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
        }
    }
}

/// A single inbound message with user, chat, text content and parsed command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text; empty for non-text messages.
    pub content: String,
    pub command: Option<Command>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True for non-empty text that is not a command.
    pub fn is_plain_text(&self) -> bool {
        self.command.is_none() && !self.content.is_empty()
    }
}

/// How the platform should render [`Reply::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParseMode {
    #[default]
    Plain,
    Html,
}

/// Inline button that opens a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub label: String,
    pub url: String,
}

impl InlineButton {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Outbound reply: text plus optional inline keyboard (rows of buttons).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub parse_mode: ParseMode,
    pub buttons: Vec<Vec<InlineButton>>,
    pub disable_link_preview: bool,
}

impl Reply {
    /// Plain-text reply without buttons.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
            buttons: Vec::new(),
            disable_link_preview: false,
        }
    }

    /// HTML reply without buttons.
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            parse_mode: ParseMode::Html,
            ..Self::text(text)
        }
    }

    /// Appends a row with a single button.
    pub fn with_button_row(mut self, button: InlineButton) -> Self {
        self.buttons.push(vec![button]);
        self
    }

    pub fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }

    /// All buttons, row by row.
    pub fn all_buttons(&self) -> impl Iterator<Item = &InlineButton> {
        self.buttons.iter().flatten()
    }
}

/// Handler result for the chain. `Reply` carries the outbound reply so later handlers can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no reply.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and send this reply.
    Reply(Reply),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Name used in logs. Defaults to the implementing type's path.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse_plain() {
        let cmd = Command::parse("/start").unwrap();
        assert_eq!(cmd.name, "start");
        assert_eq!(cmd.mention, None);
        assert_eq!(cmd.args, "");
    }

    #[test]
    fn test_command_parse_mention_and_args() {
        let cmd = Command::parse("/start@UniSharkBot  deep-link ").unwrap();
        assert_eq!(cmd.name, "start");
        assert_eq!(cmd.mention.as_deref(), Some("UniSharkBot"));
        assert_eq!(cmd.args, "deep-link");
    }

    #[test]
    fn test_command_parse_rejects_non_commands() {
        assert!(Command::parse("hello").is_none());
        assert!(Command::parse("").is_none());
        assert!(Command::parse("/").is_none());
        assert!(Command::parse("/@bot").is_none());
        assert!(Command::parse(" /start").is_none());
    }

    #[test]
    fn test_command_is_addressed_to() {
        let bare = Command::parse("/start").unwrap();
        assert!(bare.is_addressed_to(Some("UniSharkBot")));
        assert!(bare.is_addressed_to(None));

        let mine = Command::parse("/start@unisharkbot").unwrap();
        assert!(mine.is_addressed_to(Some("UniSharkBot")));

        let other = Command::parse("/start@OtherBot").unwrap();
        assert!(!other.is_addressed_to(Some("UniSharkBot")));
        assert!(other.is_addressed_to(None));
    }

    #[test]
    fn test_command_name_is_case_insensitive() {
        for text in ["/start", "/Start", "/START", "/sTaRt@UniSharkBot"] {
            let cmd = Command::parse(text).unwrap();
            assert_eq!(cmd.name, "start", "{}", text);
        }
        let cmd = Command::parse("/START@UniSharkBot Payload").unwrap();
        assert_eq!(cmd.mention.as_deref(), Some("UniSharkBot"));
        assert_eq!(cmd.args, "Payload");
    }

    #[test]
    fn test_handler_name_is_concrete_type() {
        struct Greeter;
        impl Handler for Greeter {}

        let handler: Box<dyn Handler> = Box::new(Greeter);
        assert!(handler.name().ends_with("Greeter"));
    }

    #[test]
    fn test_user_full_name() {
        let mut user = User {
            id: 7,
            username: Some("sara_k".to_string()),
            first_name: Some("Sara".to_string()),
            last_name: Some("Khalil".to_string()),
        };
        assert_eq!(user.full_name(), "Sara Khalil");
        user.last_name = None;
        assert_eq!(user.full_name(), "Sara");
        user.first_name = None;
        assert_eq!(user.full_name(), "sara_k");
        user.username = None;
        assert_eq!(user.full_name(), "7");
    }

    #[test]
    fn test_reply_builders() {
        let reply = Reply::html("<b>hi</b>")
            .with_button_row(InlineButton::url("Site", "https://example.com"))
            .without_link_preview();
        assert_eq!(reply.parse_mode, ParseMode::Html);
        assert!(reply.disable_link_preview);
        assert_eq!(reply.all_buttons().count(), 1);

        let plain = Reply::text("hi");
        assert_eq!(plain.parse_mode, ParseMode::Plain);
        assert!(plain.buttons.is_empty());
    }
}
