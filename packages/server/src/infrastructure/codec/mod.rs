//! MessageTransform implementations that depend on a wire format.

pub mod chat_json;

pub use chat_json::ChatJsonTransform;
