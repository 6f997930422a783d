//! Route table.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::{handler, state::AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(handler::chat_relay_handler))
        .route("/ws/raw", get(handler::raw_relay_handler))
        .route("/orderbookfeed", get(handler::feed_handler))
        .route("/api/health", get(handler::health_check))
        .route("/api/connections", get(handler::list_connections))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
