//! Domain factories for creating domain entities and value objects.

use uuid::Uuid;

use super::ConnectionId;

/// Factory for generating ConnectionId instances.
///
/// Keeps id generation out of the value object so tests can build ids from
/// fixed UUIDs.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}
