//! WebSocket relay handlers.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{Connection, Frame, InboundFrame, OutboundReceiver},
    ui::state::{AppState, EndpointKind},
    usecase::{ConnectError, ConnectionGuard, RelaySession, SessionEnd},
};

/// How long the writer may take to answer a client's Close frame
pub(crate) const CLOSE_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// `/ws`: JSON chat relay
pub async fn chat_relay_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
) -> Result<Response, StatusCode> {
    accept_relay(ws, state, EndpointKind::Chat, remote_addr).await
}

/// `/ws/raw`: opaque frame relay
pub async fn raw_relay_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
) -> Result<Response, StatusCode> {
    accept_relay(ws, state, EndpointKind::Raw, remote_addr).await
}

/// Register the connection before upgrading, so a full endpoint can still
/// answer with a plain HTTP status.
async fn accept_relay(
    ws: WebSocketUpgrade,
    state: Arc<AppState>,
    kind: EndpointKind,
    remote_addr: SocketAddr,
) -> Result<Response, StatusCode> {
    let endpoint = state.endpoint(kind);
    let relay_name = endpoint.transform.name();

    // Create a bounded channel for this client to receive broadcasts
    let (tx, rx) = mpsc::channel(endpoint.outbound_capacity);

    let connection = match endpoint.connect_usecase().execute(remote_addr, tx).await {
        Ok(connection) => connection,
        Err(e @ ConnectError::CapacityExceeded { .. }) => {
            tracing::warn!(
                "Rejecting connection from {} on '{}' relay: {}",
                remote_addr,
                relay_name,
                e
            );
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    };
    tracing::info!(
        "New incoming connection from client {} on '{}' relay (id: '{}')",
        remote_addr,
        relay_name,
        connection.id
    );

    // Dropped without release if the upgrade never completes
    let guard = ConnectionGuard::new(connection.id, endpoint.registry.clone());
    let max_message_bytes = state.max_message_bytes;

    Ok(ws
        .max_message_size(max_message_bytes)
        .on_upgrade(move |socket| handle_relay_socket(socket, state, kind, connection, guard, rx))
        .into_response())
}

async fn handle_relay_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    kind: EndpointKind,
    connection: Connection,
    guard: ConnectionGuard,
    mut rx: OutboundReceiver,
) {
    let (mut sender, receiver) = socket.split();
    let id = connection.id;
    let session = RelaySession::new(connection, state.endpoint(kind).relay_usecase());

    // Spawn a task to read messages from this client and broadcast them
    let mut recv_task = tokio::spawn(async move {
        session
            .run(receiver.map(|msg| msg.map(InboundFrame::from)))
            .await
    });

    // Spawn a task to write broadcasts from other clients to this client
    let (close_tx, mut close_rx) = oneshot::channel::<()>();
    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(frame) => {
                        if let Err(e) = sender.send(to_message(&frame)).await {
                            tracing::warn!("Write error to '{}': {}", id, e);
                            break;
                        }
                    }
                    None => break,
                },
                _ = &mut close_rx => break,
            }
        }
        // Flushes the Close reply queued by the read half, if any
        if let Err(e) = sender.close().await {
            tracing::debug!("Close handshake with '{}' failed: {}", id, e);
        }
    });

    // If the reader ends, let the writer finish the closing handshake;
    // if the writer ends, abort the reader
    let end = tokio::select! {
        result = &mut recv_task => {
            let _ = close_tx.send(());
            if tokio::time::timeout(CLOSE_HANDSHAKE_TIMEOUT, &mut send_task).await.is_err() {
                send_task.abort();
            }
            result.unwrap_or_else(|e| SessionEnd::TransportError(e.to_string()))
        }
        _ = &mut send_task => {
            recv_task.abort();
            SessionEnd::TransportError("outbound write failed".to_string())
        }
    };

    let removed = guard.release().await;
    tracing::info!(
        "Client '{}' disconnected ({:?}), removed from registry: {}",
        id,
        end,
        removed
    );
}

fn to_message(frame: &Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text.clone().into()),
        Frame::Binary(bytes) => Message::Binary(bytes.clone().into()),
    }
}

impl From<Message> for InboundFrame {
    fn from(msg: Message) -> Self {
        match msg {
            Message::Text(text) => InboundFrame::Data(Frame::Text(text.as_str().to_owned())),
            Message::Binary(bytes) => InboundFrame::Data(Frame::Binary(bytes.to_vec())),
            Message::Close(_) => InboundFrame::Close,
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => InboundFrame::Control,
        }
    }
}
