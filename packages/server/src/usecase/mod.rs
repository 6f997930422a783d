//! UseCase layer
//!
//! Relay business logic. Called from the UI layer; operates on the domain
//! layer through the `ConnectionRegistry` trait.

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod publish_feed;
pub mod relay_message;
pub mod relay_session;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, FeedError, RelayError};
pub use publish_feed::{FeedPublisher, FeedSink};
pub use relay_message::{FanOut, RelayMessageUseCase};
pub use relay_session::{ConnectionGuard, RelaySession, SessionEnd};
