//! Server configuration.

use std::time::Duration;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FEED_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 64 * 1024;
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;
pub const DEFAULT_MAX_CONNECTIONS: usize = 1024;

/// Broadcast relay server with a periodic feed
#[derive(Debug, Clone, Parser)]
#[command(name = "hibiki-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interval between feed payloads in milliseconds
    #[arg(long, default_value_t = DEFAULT_FEED_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub feed_interval_ms: u64,

    /// Maximum size of one inbound WebSocket message
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_BYTES, value_parser = parse_non_zero)]
    pub max_message_bytes: usize,

    /// Per-connection outbound queue length; messages beyond it are dropped
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_CAPACITY, value_parser = parse_non_zero)]
    pub outbound_capacity: usize,

    /// Maximum connections per relay endpoint
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS, value_parser = parse_non_zero)]
    pub max_connections: usize,

    /// Also deliver each message back to its sender
    #[arg(long)]
    pub echo_to_sender: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn feed_interval(&self) -> Duration {
        Duration::from_millis(self.feed_interval_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            feed_interval_ms: DEFAULT_FEED_INTERVAL_MS,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            echo_to_sender: false,
            log_level: "info".to_string(),
        }
    }
}

fn parse_non_zero(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
