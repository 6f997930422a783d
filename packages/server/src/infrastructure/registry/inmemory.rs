//! In-memory connection registry.
//!
//! A `HashMap` guarded by `tokio::sync::Mutex`. Every operation holds the lock
//! only for the map access itself; no network write happens under the lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, OutboundSender, Peer};

/// In-memory registry for one relay endpoint
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    peers: Mutex<HashMap<ConnectionId, Peer>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: Connection, outbound: OutboundSender) {
        let mut peers = self.peers.lock().await;
        peers.insert(
            connection.id,
            Peer {
                connection,
                outbound,
            },
        );
    }

    async fn unregister(&self, id: &ConnectionId) -> bool {
        let mut peers = self.peers.lock().await;
        peers.remove(id).is_some()
    }

    async fn snapshot(&self) -> Vec<Peer> {
        let peers = self.peers.lock().await;
        peers.values().cloned().collect()
    }

    async fn connections(&self) -> Vec<Connection> {
        let peers = self.peers.lock().await;
        let mut connections: Vec<Connection> =
            peers.values().map(|p| p.connection.clone()).collect();
        // Oldest first for a stable listing
        connections.sort_by_key(|c| (c.connected_at, c.remote_addr));
        connections
    }

    async fn count(&self) -> usize {
        let peers = self.peers.lock().await;
        peers.len()
    }

    async fn contains(&self, id: &ConnectionId) -> bool {
        let peers = self.peers.lock().await;
        peers.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionIdFactory, Timestamp, for_each_peer};
    use std::{collections::HashSet, net::SocketAddr, sync::Arc};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryConnectionRegistry の登録・削除・スナップショット
    // - 並行アクセス時に登録漏れ・重複登録が起きないこと
    //
    // 【なぜこのテストが必要か】
    // - Registry はブロードキャストの配信先を決める中核
    // - 読み取りループとブロードキャストが並行して Registry に触れる
    // ========================================

    fn test_connection(port: u16) -> Connection {
        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        Connection::new(ConnectionIdFactory::generate(), addr, Timestamp::new(port as i64))
    }

    #[tokio::test]
    async fn test_register_and_contains() {
        // テスト項目: 登録した接続が Registry に含まれる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let connection = test_connection(4000);
        let (tx, _rx) = mpsc::channel(8);

        // when (操作):
        registry.register(connection.clone(), tx).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 1);
        assert!(registry.contains(&connection.id).await);
        assert_eq!(registry.connections().await, vec![connection]);
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 2 回目の削除はエラーにならず false を返す
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let connection = test_connection(4001);
        let (tx, _rx) = mpsc::channel(8);
        registry.register(connection.clone(), tx).await;

        // when (操作):
        let first = registry.unregister(&connection.id).await;
        let second = registry.unregister(&connection.id).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_snapshot_is_not_affected_by_later_registration() {
        // テスト項目: スナップショット取得後の登録はスナップショットに含まれない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (tx1, _rx1) = mpsc::channel(8);
        registry.register(test_connection(4002), tx1).await;

        // when (操作):
        let snapshot = registry.snapshot().await;
        let (tx2, _rx2) = mpsc::channel(8);
        registry.register(test_connection(4003), tx2).await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn test_for_each_peer_visits_every_peer_once() {
        // テスト項目: for_each_peer は登録済みの接続をちょうど 1 回ずつ訪問する
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let mut expected = HashSet::new();
        let mut receivers = Vec::new();
        for port in 4010..4013 {
            let connection = test_connection(port);
            let (tx, rx) = mpsc::channel(8);
            expected.insert(connection.id);
            receivers.push(rx);
            registry.register(connection, tx).await;
        }

        // when (操作):
        let mut visited = Vec::new();
        for_each_peer(&registry, |peer| visited.push(peer.connection.id)).await;

        // then (期待する結果):
        assert_eq!(visited.len(), 3);
        assert_eq!(visited.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_of_100_connections() {
        // テスト項目: 100 接続を並行登録しても登録漏れ・重複がない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());

        // when (操作): 登録とスナップショットを並行に実行
        let handles: Vec<_> = (0..100u16)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    let connection = test_connection(5000 + i);
                    let id = connection.id;
                    let (tx, rx) = mpsc::channel(8);
                    registry.register(connection, tx).await;
                    let _ = registry.snapshot().await;
                    (id, rx)
                })
            })
            .collect();
        let mut ids = HashSet::new();
        let mut receivers = Vec::new();
        for handle in handles {
            let (id, rx) = handle.await.unwrap();
            ids.insert(id);
            receivers.push(rx);
        }

        // then (期待する結果):
        assert_eq!(ids.len(), 100);
        assert_eq!(registry.count().await, 100);
        for id in &ids {
            assert!(registry.contains(id).await);
        }
    }
}
