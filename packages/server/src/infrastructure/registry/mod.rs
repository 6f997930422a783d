//! ConnectionRegistry implementations
//!
//! The usecase layer depends on the `ConnectionRegistry` trait (domain layer)
//! and never on these types directly.

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
