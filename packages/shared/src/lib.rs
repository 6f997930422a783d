//! Shared utilities for the Hibiki server and client.

pub mod logger;
pub mod time;
