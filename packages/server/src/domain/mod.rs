//! Domain layer for the broadcast relay.
//!
//! This module contains the relay's core types and policies, independent of
//! the WebSocket transport and wire DTOs.

pub mod clock;
pub mod entity;
pub mod error;
pub mod factory;
pub mod frame;
pub mod registry;
pub mod transform;
pub mod value_object;

pub use clock::MonotonicClock;
pub use entity::{ChatMessage, Connection, DeliveryPolicy};
pub use error::TransformError;
pub use factory::ConnectionIdFactory;
pub use frame::{Frame, InboundFrame};
pub use registry::{ConnectionRegistry, OutboundReceiver, OutboundSender, Peer, for_each_peer};
pub use transform::{MessageTransform, Passthrough};
pub use value_object::{ConnectionId, Timestamp};
