//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::{ConnectionRegistry, DeliveryPolicy, MessageTransform, Passthrough},
    infrastructure::{codec::ChatJsonTransform, registry::InMemoryConnectionRegistry},
    usecase::{ConnectClientUseCase, FeedPublisher, RelayMessageUseCase},
};

/// One relay endpoint: its own registry plus the transform applied to every
/// inbound message.
pub struct RelayEndpoint {
    /// Registry（データアクセス層の抽象化）
    pub registry: Arc<dyn ConnectionRegistry>,
    pub transform: Arc<dyn MessageTransform>,
    pub policy: DeliveryPolicy,
    pub outbound_capacity: usize,
    pub max_connections: usize,
}

impl RelayEndpoint {
    pub fn new(transform: Arc<dyn MessageTransform>, config: &ServerConfig) -> Self {
        Self {
            registry: Arc::new(InMemoryConnectionRegistry::new()),
            transform,
            policy: DeliveryPolicy::from_echo_flag(config.echo_to_sender),
            outbound_capacity: config.outbound_capacity,
            max_connections: config.max_connections,
        }
    }

    pub fn connect_usecase(&self) -> ConnectClientUseCase {
        ConnectClientUseCase::new(self.registry.clone(), self.max_connections)
    }

    pub fn relay_usecase(&self) -> RelayMessageUseCase {
        RelayMessageUseCase::new(self.registry.clone(), self.transform.clone(), self.policy)
    }
}

/// Relay endpoints served by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Chat,
    Raw,
}

/// Shared application state
pub struct AppState {
    /// JSON chat relay (`/ws`)
    pub chat: RelayEndpoint,
    /// Opaque frame relay (`/ws/raw`)
    pub raw: RelayEndpoint,
    /// Periodic feed (`/orderbookfeed`)
    pub feed: FeedPublisher,
    pub max_message_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            chat: RelayEndpoint::new(Arc::new(ChatJsonTransform), config),
            raw: RelayEndpoint::new(Arc::new(Passthrough), config),
            feed: FeedPublisher::new(config.feed_interval()),
            max_message_bytes: config.max_message_bytes,
        }
    }

    pub fn endpoint(&self, kind: EndpointKind) -> &RelayEndpoint {
        match kind {
            EndpointKind::Chat => &self.chat,
            EndpointKind::Raw => &self.raw,
        }
    }
}
