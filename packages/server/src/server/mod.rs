//! WebSocket relay server runner.

mod runner;
mod signal;

pub use runner::{run_server, serve};
pub use signal::shutdown_signal;
