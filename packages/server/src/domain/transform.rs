//! Per-endpoint inbound message transforms.

use super::{Frame, TransformError};

/// Validation / normalisation step applied to every inbound frame before it
/// is broadcast.
///
/// A rejected frame is dropped without closing the sender's connection.
pub trait MessageTransform: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn apply(&self, frame: Frame) -> Result<Frame, TransformError>;
}

/// Forwards frames unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl MessageTransform for Passthrough {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, TransformError> {
        Ok(frame)
    }
}
