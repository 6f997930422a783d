//! WebSocket broadcast relay library.
//!
//! Clients connected to a relay endpoint have every message they send fanned
//! out to all other connected clients; feed subscribers receive a periodic
//! timestamped payload.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod server;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use server::run_server;
