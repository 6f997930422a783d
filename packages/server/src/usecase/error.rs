//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::TransformError;

/// Errors while accepting a connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("relay capacity exceeded: maximum {capacity} connections allowed (current: {current})")]
    CapacityExceeded { capacity: usize, current: usize },
}

/// Errors while relaying one inbound message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The endpoint transform rejected the message; it is dropped
    #[error("message rejected: {0}")]
    Rejected(#[from] TransformError),
}

/// Errors while publishing to a feed subscriber
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("feed sink closed: {0}")]
    SinkClosed(String),
}
