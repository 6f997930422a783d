//! UseCase: accepting a relay connection
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録と接続数上限のチェック
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - 異常系：接続数上限に達している場合（Registry に登録されない）

use std::{net::SocketAddr, sync::Arc};

use crate::domain::{Connection, ConnectionIdFactory, ConnectionRegistry, OutboundSender, Timestamp};

use super::error::ConnectError;

/// Connection acceptance usecase
pub struct ConnectClientUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    max_connections: usize,
}

impl ConnectClientUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, max_connections: usize) -> Self {
        Self {
            registry,
            max_connections,
        }
    }

    /// Register a newly accepted connection.
    ///
    /// The capacity check and the insert are separate registry calls, so
    /// concurrent accepts can overshoot `max_connections` by a few.
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - the registered connection
    /// * `Err(ConnectError::CapacityExceeded)` - nothing was registered
    pub async fn execute(
        &self,
        remote_addr: SocketAddr,
        outbound: OutboundSender,
    ) -> Result<Connection, ConnectError> {
        let current = self.registry.count().await;
        if current >= self.max_connections {
            return Err(ConnectError::CapacityExceeded {
                capacity: self.max_connections,
                current,
            });
        }

        let connection = Connection::new(
            ConnectionIdFactory::generate(),
            remote_addr,
            Timestamp::now(),
        );
        self.registry.register(connection.clone(), outbound).await;

        Ok(connection)
    }
}
