//! Connection registry abstraction.
//!
//! The domain defines the registry contract; `infrastructure::registry`
//! provides the in-memory implementation (dependency inversion).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Connection, ConnectionId, Frame};

/// Outbound queue feeding one connection's writer task
pub type OutboundSender = mpsc::Sender<Arc<Frame>>;
pub type OutboundReceiver = mpsc::Receiver<Arc<Frame>>;

/// A registered connection together with its outbound queue
#[derive(Debug, Clone)]
pub struct Peer {
    pub connection: Connection,
    pub outbound: OutboundSender,
}

/// Live set of open connections on one relay endpoint.
///
/// Implementations must tolerate concurrent registration, removal and
/// snapshots from any number of connection tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Add a connection. Ids are unique, so no duplicate check is made.
    async fn register(&self, connection: Connection, outbound: OutboundSender);

    /// Remove a connection. Returns `false` if it was not registered, so
    /// calling it twice is harmless.
    async fn unregister(&self, id: &ConnectionId) -> bool;

    /// Peers registered at call time. Later registrations are not included.
    async fn snapshot(&self) -> Vec<Peer>;

    /// Registered connections, without their queues
    async fn connections(&self) -> Vec<Connection>;

    async fn count(&self) -> usize;

    async fn contains(&self, id: &ConnectionId) -> bool;
}

/// Invoke `f` once per peer registered at call time.
///
/// Iterates a snapshot: the registry lock is not held while `f` runs, and
/// connections registered or removed meanwhile do not affect the iteration.
pub async fn for_each_peer<F>(registry: &dyn ConnectionRegistry, mut f: F)
where
    F: FnMut(&Peer),
{
    for peer in registry.snapshot().await {
        f(&peer);
    }
}
