//! Logger setup shared by the server and client binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise `default_level` is applied to the
/// calling binary and the Hibiki crates, while dependencies stay at `warn`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let default_directives = format!(
        "warn,{crate_name}={default_level},hibiki_server={default_level},hibiki_client={default_level},tower_http={default_level}"
    );

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // try_init: tests and repeated calls must not panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .try_init();
}
