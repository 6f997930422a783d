//! Infrastructure layer: concrete registry storage, wire DTOs and codecs.

pub mod codec;
pub mod dto;
pub mod registry;
