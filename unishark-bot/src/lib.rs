//! # UniShark bot
//!
//! Wires the `/start` and text-trigger handlers into a handler chain and runs it on the Telegram layer
//! (webhook or polling). Core types come from unishark-core, the chain from handler-chain, Telegram plumbing
//! from unishark-telegram.

pub mod cli;
pub mod handlers;

pub use cli::{load_config, Cli, Commands, RunArgs};
pub use handlers::{build_handler_chain, StartHandler, TriggerHandler, TriggerRule};
