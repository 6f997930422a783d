//! UI layer: HTTP / WebSocket handlers and routing.

pub mod handler;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::{AppState, EndpointKind, RelayEndpoint};
