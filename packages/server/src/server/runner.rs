use std::{future::Future, net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;

use crate::{
    config::ServerConfig,
    error::ServerError,
    ui::{AppState, create_router},
};

use super::signal::shutdown_signal;

/// Bind the configured address and serve until Ctrl-C / SIGTERM.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let state = Arc::new(AppState::from_config(&config));
    serve(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    tracing::info!("Relay listening on ws://{}/ws", local_addr);
    tracing::info!("Raw relay listening on ws://{}/ws/raw", local_addr);
    tracing::info!(
        "Order book feed on ws://{}/orderbookfeed (every {:?})",
        local_addr,
        state.feed.interval()
    );

    let app = create_router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
