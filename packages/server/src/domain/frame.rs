//! Message frames carried by the relay.

/// One complete data message.
///
/// WebSocket framing delivers whole messages, so a frame is never a partial
/// read and never holds more than one logical message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

impl Frame {
    /// Raw payload bytes regardless of the frame kind.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Frame::Text(text) => text.as_bytes(),
            Frame::Binary(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// What the read loop can observe on a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// A data message to relay
    Data(Frame),
    /// Peer requested close
    Close,
    /// Ping / pong and other control traffic
    Control,
}
