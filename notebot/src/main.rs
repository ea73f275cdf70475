//! notebot entry point: parse CLI, load env config, run the bot.

use anyhow::Result;
use clap::Parser;
use notebot::{cli, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = cli::load_config(token)?;
            run_bot(config).await
        }
    }
}
