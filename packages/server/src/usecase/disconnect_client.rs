//! UseCase: releasing a relay connection

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// Connection release usecase
pub struct DisconnectClientUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectClientUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Remove the connection from the registry.
    ///
    /// Returns `false` when it was already gone (evicted by a broadcast or
    /// released twice).
    pub async fn execute(&self, id: &ConnectionId) -> bool {
        self.registry.unregister(id).await
    }

    /// Number of connections still registered
    pub async fn count_remaining(&self) -> usize {
        self.registry.count().await
    }
}
