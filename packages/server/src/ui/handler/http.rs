//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hibiki_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    domain::Connection,
    infrastructure::dto::http::{ConnectionSummaryDto, ConnectionsDto},
    ui::state::{AppState, RelayEndpoint},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Registered connections of every relay endpoint
pub async fn list_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionsDto> {
    Json(ConnectionsDto {
        chat: summarize(&state.chat).await,
        raw: summarize(&state.raw).await,
        feed_subscribers: state.feed.active_subscribers(),
    })
}

async fn summarize(endpoint: &RelayEndpoint) -> Vec<ConnectionSummaryDto> {
    endpoint
        .registry
        .connections()
        .await
        .into_iter()
        .map(|c: Connection| ConnectionSummaryDto {
            id: c.id.to_string(),
            remote_addr: c.remote_addr.to_string(),
            connected_at: timestamp_to_jst_rfc3339(c.connected_at.value()),
        })
        .collect()
}
