//! Command line: `unishark-bot run [--token] [--port] [--webhook-url] [--mode]`. Flags override env config.

use clap::{Args, Parser, Subcommand};
use unishark_core::Result;
use unishark_telegram::{IngressMode, TelegramConfig};

#[derive(Parser, Debug)]
#[command(name = "unishark-bot")]
#[command(about = "UniShark Telegram notification bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot (config from env / .env; flags override).
    Run(RunArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Bot token; overrides TELEGRAM_BOT_TOKEN.
    #[arg(short, long)]
    pub token: Option<String>,
    /// Listening port for webhook mode; overrides PORT.
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Public base URL for webhook mode; overrides WEBHOOK_URL.
    #[arg(long)]
    pub webhook_url: Option<String>,
    /// Delivery mode: auto, webhook or polling.
    #[arg(short, long, default_value = "auto")]
    pub mode: IngressMode,
}

/// Loads config from env and applies CLI overrides.
pub fn load_config(args: &RunArgs) -> Result<TelegramConfig> {
    let mut config = TelegramConfig::load(args.token.clone())?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(url) = &args.webhook_url {
        config.webhook_url = Some(url.clone());
    }
    Ok(config)
}
