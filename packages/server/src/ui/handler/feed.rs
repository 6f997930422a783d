//! WebSocket feed handler.

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};

use tokio::sync::oneshot;

use crate::{
    ui::state::AppState,
    usecase::{FeedError, FeedSink},
};

use super::websocket::CLOSE_HANDSHAKE_TIMEOUT;

/// `/orderbookfeed`: read-only periodic feed
pub async fn feed_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
) -> Response {
    ws.on_upgrade(move |socket| handle_feed_socket(socket, state, remote_addr))
}

async fn handle_feed_socket(socket: WebSocket, state: Arc<AppState>, remote_addr: SocketAddr) {
    tracing::info!(
        "New incoming connection from client {} to order book feed",
        remote_addr
    );

    let (sender, mut receiver) = socket.split();
    let publisher = state.feed.clone();
    let (closed_tx, closed_rx) = oneshot::channel::<()>();

    let mut publish_task = tokio::spawn(async move {
        let mut sink = WebSocketFeedSink(sender);
        tokio::select! {
            published = publisher.run(&mut sink) => {
                tracing::debug!("Published {} payloads to {}", published, remote_addr);
            }
            _ = closed_rx => {}
        }
        sink.close(remote_addr).await;
    });

    // Subscribers never send data; watch the inbound half for close
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("Feed read error from {}: {}", remote_addr, e);
                    break;
                }
            }
        }
        let _ = closed_tx.send(());
    });

    tokio::select! {
        _ = &mut publish_task => recv_task.abort(),
        _ = &mut recv_task => {
            // The publish task answers the closing handshake before it ends
            if tokio::time::timeout(CLOSE_HANDSHAKE_TIMEOUT, &mut publish_task).await.is_err() {
                publish_task.abort();
            }
        }
    };

    tracing::info!("Feed subscriber {} disconnected", remote_addr);
}

struct WebSocketFeedSink(SplitSink<WebSocket, Message>);

impl WebSocketFeedSink {
    /// Send our Close frame, or flush the reply to the client's one
    async fn close(&mut self, remote_addr: SocketAddr) {
        if let Err(e) = self.0.close().await {
            tracing::debug!("Close handshake with {} failed: {}", remote_addr, e);
        }
    }
}

#[async_trait]
impl FeedSink for WebSocketFeedSink {
    async fn publish(&mut self, line: String) -> Result<(), FeedError> {
        self.0
            .send(Message::Text(line.into()))
            .await
            .map_err(|e| FeedError::SinkClosed(e.to_string()))
    }
}
