//! WebSocket message DTOs for the relay.

use serde::{Deserialize, Serialize};

use crate::domain::ChatMessage;

/// Chat message sent and received on the structured relay endpoint.
///
/// All three fields are required. Unknown fields are ignored on decode and
/// therefore stripped by the re-encode before broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub username: String,
    pub color: String,
    pub content: String,
}

impl From<ChatMessageDto> for ChatMessage {
    fn from(dto: ChatMessageDto) -> Self {
        ChatMessage::new(dto.username, dto.color, dto.content)
    }
}

impl From<ChatMessage> for ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            username: message.username,
            color: message.color,
            content: message.content,
        }
    }
}

/// Line pushed to feed subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPayload {
    /// Unix timestamp in nanoseconds, strictly increasing
    pub timestamp: i64,
}

impl FeedPayload {
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }

    /// Wire form: `orderbook data -> <timestamp>\n`
    pub fn to_line(&self) -> String {
        format!("orderbook data -> {}\n", self.timestamp)
    }

    /// Parse a wire line back into a payload
    pub fn parse_line(line: &str) -> Option<Self> {
        line.trim_end_matches('\n')
            .strip_prefix("orderbook data -> ")?
            .parse()
            .ok()
            .map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_payload_line_format() {
        // テスト項目: フィードの行フォーマットが仕様通りである
        // given (前提条件):
        let payload = FeedPayload::new(1_700_000_000_123_456_789);

        // when (操作):
        let line = payload.to_line();

        // then (期待する結果):
        assert_eq!(line, "orderbook data -> 1700000000123456789\n");
        assert_eq!(FeedPayload::parse_line(&line), Some(payload));
    }

    #[test]
    fn test_feed_payload_parse_rejects_other_text() {
        // テスト項目: 別の形式の行はパースできない
        // then (期待する結果):
        assert_eq!(FeedPayload::parse_line("hello\n"), None);
        assert_eq!(FeedPayload::parse_line("orderbook data -> abc\n"), None);
    }
}
