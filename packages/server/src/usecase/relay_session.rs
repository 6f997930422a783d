//! UseCase: per-connection relay loop
//!
//! Drives one connection through
//! `Reading → (MessageReceived → Transforming → Broadcasting) → Closed`.
//! The loop is transport-agnostic: it consumes a stream of [`InboundFrame`]
//! results, so the WebSocket handler and the tests share the same code.
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：受信メッセージのブロードキャスト、Close による終了
//! - 異常系：不正なメッセージ（接続は維持）、トランスポートエラー（接続終了）
//! - 後始末：どの終了経路でも Registry から削除される

use std::{fmt, sync::Arc};

use futures_util::{Stream, StreamExt};

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, InboundFrame};

use super::{DisconnectClientUseCase, RelayMessageUseCase};

/// Why a relay session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// Client sent a Close frame
    Closed,
    /// Inbound stream ended without a Close frame
    EndOfStream,
    /// The transport failed; the stream is unusable
    TransportError(String),
}

/// Read loop for one relay connection
pub struct RelaySession {
    connection: Connection,
    relay: RelayMessageUseCase,
}

impl RelaySession {
    pub fn new(connection: Connection, relay: RelayMessageUseCase) -> Self {
        Self { connection, relay }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Relay every inbound data frame until the connection ends.
    ///
    /// Rejected messages are dropped and the loop continues. Any transport
    /// error ends the loop: a failed WebSocket stream does not recover, and
    /// continuing would spin on the same error.
    pub async fn run<S, E>(&self, mut inbound: S) -> SessionEnd
    where
        S: Stream<Item = Result<InboundFrame, E>> + Unpin,
        E: fmt::Display,
    {
        let id = self.connection.id;

        while let Some(next) = inbound.next().await {
            match next {
                Ok(InboundFrame::Data(frame)) => {
                    let size = frame.len();
                    match self.relay.execute(&id, frame).await {
                        Ok(fan_out) => tracing::debug!(
                            "Relayed {} bytes from '{}' to {} peers ({} lagging, {} gone)",
                            size,
                            id,
                            fan_out.delivered,
                            fan_out.lagging.len(),
                            fan_out.gone.len()
                        ),
                        Err(e) => tracing::warn!("Dropped message from '{}': {}", id, e),
                    }
                }
                Ok(InboundFrame::Close) => {
                    tracing::info!("Client '{}' requested close", id);
                    return SessionEnd::Closed;
                }
                Ok(InboundFrame::Control) => {}
                Err(e) => {
                    tracing::warn!("Read error on '{}': {}", id, e);
                    return SessionEnd::TransportError(e.to_string());
                }
            }
        }

        SessionEnd::EndOfStream
    }
}

/// Keeps a connection registered until it is released.
///
/// [`ConnectionGuard::release`] unregisters explicitly. If the guard is
/// dropped unreleased (aborted task, failed upgrade, panic) the removal is
/// spawned onto the current runtime instead.
pub struct ConnectionGuard {
    id: ConnectionId,
    registry: Arc<dyn ConnectionRegistry>,
    armed: bool,
}

impl ConnectionGuard {
    pub fn new(id: ConnectionId, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            id,
            registry,
            armed: true,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Unregister now. Returns `false` if the connection was already gone.
    pub async fn release(mut self) -> bool {
        self.armed = false;
        DisconnectClientUseCase::new(self.registry.clone())
            .execute(&self.id)
            .await
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let id = self.id;
        let registry = self.registry.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if registry.unregister(&id).await {
                        tracing::debug!("Connection '{}' released by guard", id);
                    }
                });
            }
            Err(_) => tracing::warn!("No runtime to release connection '{}'", id),
        }
    }
}
