//! Canned replies to fixed text triggers. Applies to plain text only (no commands); case-sensitive;
//! rules are tried in order and the first match wins.

use async_trait::async_trait;
use tracing::debug;
use unishark_core::{Handler, HandlerResponse, Message, Reply, Result};

pub const INSULT_TRIGGER: &str = "كسمك";
pub const INSULT_RESPONSE: &str = "الله يسامحك";
pub const HARFOUSH_TRIGGER: &str = "حرفوش";
pub const HARFOUSH_RESPONSE: &str = "حرفوش عمك";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMatch {
    /// Whole message equals the phrase.
    Exact,
    /// Phrase appears anywhere in the message.
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRule {
    pub phrase: String,
    pub matching: TriggerMatch,
    pub response: String,
}

impl TriggerRule {
    pub fn exact(phrase: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            matching: TriggerMatch::Exact,
            response: response.into(),
        }
    }

    pub fn contains(phrase: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            matching: TriggerMatch::Contains,
            response: response.into(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        match self.matching {
            TriggerMatch::Exact => text == self.phrase,
            TriggerMatch::Contains => text.contains(self.phrase.as_str()),
        }
    }
}

/// The bot's two triggers. The first is exact-match, the second substring-match.
pub fn default_rules() -> Vec<TriggerRule> {
    vec![
        TriggerRule::exact(INSULT_TRIGGER, INSULT_RESPONSE),
        TriggerRule::contains(HARFOUSH_TRIGGER, HARFOUSH_RESPONSE),
    ]
}

pub struct TriggerHandler {
    rules: Vec<TriggerRule>,
}

impl TriggerHandler {
    pub fn new(rules: Vec<TriggerRule>) -> Self {
        Self { rules }
    }

    /// Response of the first rule matching `text`.
    pub fn response_for(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(|rule| rule.response.as_str())
    }
}

impl Default for TriggerHandler {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

#[async_trait]
impl Handler for TriggerHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_plain_text() {
            return Ok(HandlerResponse::Continue);
        }
        match self.response_for(&message.content) {
            Some(response) => {
                debug!(chat_id = message.chat.id, "Text trigger matched");
                Ok(HandlerResponse::Reply(Reply::text(response)))
            }
            None => Ok(HandlerResponse::Continue),
        }
    }
}
