//! Handler modules for HTTP and WebSocket endpoints.

pub mod feed;
pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{health_check, list_connections};

// Re-export WebSocket handlers
pub use feed::feed_handler;
pub use websocket::{chat_relay_handler, raw_relay_handler};
