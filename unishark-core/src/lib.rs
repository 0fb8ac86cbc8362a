//! # unishark-core
//!
//! Core types and traits for the UniShark bot: [`Bot`], [`Handler`], message, command and reply types,
//! and tracing initialization. Transport-agnostic; used by handler-chain, unishark-telegram and unishark-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Command, Handler, HandlerResponse, InlineButton, Message, ParseMode, Reply,
    ToCoreMessage, ToCoreUser, User,
};
