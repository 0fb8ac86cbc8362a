use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Config error: {0}")]
    Config(String),

    /// Outbound call to the messaging platform failed (sendMessage, setWebhook, getUpdates).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Inbound payload could not be decoded into an update.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
