//! Core domain models for the broadcast relay.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, Timestamp};

/// One client connected to a relay endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Connection identifier
    pub id: ConnectionId,
    /// Remote peer address, for diagnostics only
    pub remote_addr: SocketAddr,
    /// Timestamp when the connection was accepted
    pub connected_at: Timestamp,
}

impl Connection {
    /// Create a new connection
    pub fn new(id: ConnectionId, remote_addr: SocketAddr, connected_at: Timestamp) -> Self {
        Self {
            id,
            remote_addr,
            connected_at,
        }
    }
}

/// Chat message relayed on the structured endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Sender display name
    pub username: String,
    /// Display color chosen by the sender
    pub color: String,
    /// Message body
    pub content: String,
}

impl ChatMessage {
    pub fn new(username: String, color: String, content: String) -> Self {
        Self {
            username,
            color,
            content,
        }
    }
}

/// Whether the sender of a message is part of its own fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryPolicy {
    /// Every peer except the sender (default)
    #[default]
    ExcludeSender,
    /// Every peer including the sender
    IncludeSender,
}

impl DeliveryPolicy {
    pub fn from_echo_flag(echo_to_sender: bool) -> Self {
        if echo_to_sender {
            Self::IncludeSender
        } else {
            Self::ExcludeSender
        }
    }

    /// Whether `peer` should receive a message sent by `sender`
    pub fn targets(&self, sender: &ConnectionId, peer: &ConnectionId) -> bool {
        match self {
            Self::ExcludeSender => sender != peer,
            Self::IncludeSender => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionIdFactory;

    #[test]
    fn test_delivery_policy_exclude_sender() {
        // テスト項目: ExcludeSender は送信者自身を配信対象から外す
        // given (前提条件):
        let policy = DeliveryPolicy::from_echo_flag(false);
        let sender = ConnectionIdFactory::generate();
        let other = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_eq!(policy, DeliveryPolicy::ExcludeSender);
        assert!(!policy.targets(&sender, &sender));
        assert!(policy.targets(&sender, &other));
    }

    #[test]
    fn test_delivery_policy_include_sender() {
        // テスト項目: IncludeSender は送信者自身にも配信する
        // given (前提条件):
        let policy = DeliveryPolicy::from_echo_flag(true);
        let sender = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert!(policy.targets(&sender, &sender));
    }
}
