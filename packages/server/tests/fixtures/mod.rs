//! Test fixtures: an in-process server on an ephemeral port and WebSocket
//! client helpers.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hibiki_server::{ServerConfig, server::serve, ui::AppState};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::oneshot,
    task::JoinHandle,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long a test waits before concluding nothing will arrive
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// How long a test waits for something that must arrive
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let state = Arc::new(AppState::from_config(&config));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn({
            let state = state.clone();
            async move {
                serve(listener, state, async move {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Test server failed");
            }
        });

        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    pub async fn connect(&self, path: &str) -> WsClient {
        let (ws, _response) = connect_async(self.ws_url(path))
            .await
            .expect("Failed to connect WebSocket");
        ws
    }

    /// Wait until `condition` holds on the server state
    pub async fn wait_until<F, Fut>(&self, mut condition: F)
    where
        F: FnMut(Arc<AppState>) -> Fut,
        Fut: std::future::Future<Output = bool>,
    {
        let result = tokio::time::timeout(DELIVERY_TIMEOUT, async {
            while !condition(self.state.clone()).await {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        assert!(result.is_ok(), "condition not met within {DELIVERY_TIMEOUT:?}");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

pub async fn send_text(ws: &mut WsClient, text: &str) {
    ws.send(Message::text(text.to_string()))
        .await
        .expect("Failed to send text");
}

pub async fn send_binary(ws: &mut WsClient, bytes: &[u8]) {
    ws.send(Message::binary(bytes.to_vec()))
        .await
        .expect("Failed to send binary");
}

/// Next data message, skipping control frames. `None` on timeout or close.
pub async fn recv_data(ws: &mut WsClient, wait: Duration) -> Option<Message> {
    tokio::time::timeout(wait, async {
        while let Some(msg) = ws.next().await {
            match msg {
                Ok(msg @ (Message::Text(_) | Message::Binary(_))) => return Some(msg),
                Ok(Message::Close(_)) | Err(_) => return None,
                Ok(_) => continue,
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}

/// Next text message as a String; panics if none arrives in time.
pub async fn expect_text(ws: &mut WsClient) -> String {
    match recv_data(ws, DELIVERY_TIMEOUT).await {
        Some(Message::Text(text)) => text.as_str().to_string(),
        other => panic!("expected text message, got {other:?}"),
    }
}

/// Assert that no data message arrives within the quiet period
pub async fn expect_silence(ws: &mut WsClient) {
    if let Some(msg) = recv_data(ws, QUIET_PERIOD).await {
        panic!("expected no message, got {msg:?}");
    }
}

/// Close from the client side and assert the server completes the closing
/// handshake instead of resetting the connection.
pub async fn close_cleanly(ws: &mut WsClient) {
    ws.close(None).await.expect("Failed to close");

    let result = tokio::time::timeout(DELIVERY_TIMEOUT, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) | None => return,
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("closing handshake failed: {e:?}"),
            }
        }
    })
    .await;
    assert!(result.is_ok(), "no close reply within {DELIVERY_TIMEOUT:?}");
}
