//! Hibiki CLI client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hibiki-client -- chat --username alice --color red
//! cargo run --bin hibiki-client -- feed
//! ```

use clap::{Parser, Subcommand};
use hibiki_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "hibiki-client", version, about)]
struct Cli {
    /// Server base URL
    #[arg(long, default_value = "ws://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Join the chat relay
    Chat {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, default_value = "white")]
        color: String,
    },
    /// Subscribe to the order book feed
    Feed,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let result = match cli.command {
        Command::Chat { username, color } => {
            hibiki_client::run_chat(&cli.url, username, color).await
        }
        Command::Feed => hibiki_client::run_feed(&cli.url).await,
    };

    // The line editor thread may still be blocked on stdin
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    }
}
