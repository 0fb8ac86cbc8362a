//! Binary for the UniShark Telegram bot.

use anyhow::Result;
use clap::Parser;
use tracing::error;
use unishark_bot::{build_handler_chain, load_config, Cli, Commands, RunArgs};
use unishark_core::init_tracing;
use unishark_telegram::run_bot;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args).await,
    }
}

async fn run(args: RunArgs) -> Result<()> {
    // Logging comes up before config so a missing token is reported through it.
    let log_file = std::env::var("LOG_FILE").ok().filter(|f| !f.trim().is_empty());
    init_tracing(log_file.as_deref())?;

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration, bot not started");
            return Err(e.into());
        }
    };

    run_bot(config, args.mode, build_handler_chain)
        .await
        .inspect_err(|e| error!(error = %e, "Bot exited with error"))
}
