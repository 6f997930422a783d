//! WebSocket broadcast relay server.
//!
//! Relays messages on `/ws` (JSON chat) and `/ws/raw` (opaque frames) to all
//! other connected clients, and publishes a periodic feed on `/orderbookfeed`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hibiki-server -- --port 3000
//! ```

use clap::Parser;
use hibiki_server::ServerConfig;
use hibiki_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = hibiki_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
