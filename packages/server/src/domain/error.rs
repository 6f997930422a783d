//! Domain layer error definitions.

use thiserror::Error;

/// Errors raised while transforming an inbound frame before broadcast
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Payload does not decode as a chat message
    #[error("malformed chat message: {0}")]
    MalformedChat(String),
}
