//! JSON chat message transform.

use crate::{
    domain::{ChatMessage, Frame, MessageTransform, TransformError},
    infrastructure::dto::websocket::ChatMessageDto,
};

/// Decodes inbound frames as [`ChatMessageDto`] and re-encodes them as JSON
/// text, so peers only ever see normalised chat messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatJsonTransform;

impl ChatJsonTransform {
    pub fn decode(bytes: &[u8]) -> Result<ChatMessage, TransformError> {
        serde_json::from_slice::<ChatMessageDto>(bytes)
            .map(ChatMessage::from)
            .map_err(|e| TransformError::MalformedChat(e.to_string()))
    }

    pub fn encode(message: ChatMessage) -> Result<String, TransformError> {
        serde_json::to_string(&ChatMessageDto::from(message))
            .map_err(|e| TransformError::MalformedChat(e.to_string()))
    }
}

impl MessageTransform for ChatJsonTransform {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, TransformError> {
        let message = Self::decode(frame.as_bytes())?;
        tracing::info!(
            "Received message from '{}' (color: {}): {}",
            message.username,
            message.color,
            message.content
        );
        Self::encode(message).map(Frame::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_message_is_reencoded() {
        // テスト項目: 正しいチャットメッセージは JSON テキストとして再エンコードされる
        // given (前提条件):
        let frame = Frame::Text(r#"{"username":"a","color":"red","content":"hi"}"#.to_string());

        // when (操作):
        let result = ChatJsonTransform.apply(frame);

        // then (期待する結果):
        let Ok(Frame::Text(text)) = result else {
            panic!("expected text frame, got {result:?}");
        };
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"username": "a", "color": "red", "content": "hi"})
        );
    }

    #[test]
    fn test_unknown_fields_are_stripped() {
        // テスト項目: 未知のフィールドは再エンコード時に取り除かれる
        // given (前提条件):
        let frame = Frame::Text(
            r#"{"content":"hi","extra":1,"color":"red","username":"a"}"#.to_string(),
        );

        // when (操作):
        let result = ChatJsonTransform.apply(frame);

        // then (期待する結果): フィールド順も正規化される
        assert_eq!(
            result,
            Ok(Frame::Text(
                r#"{"username":"a","color":"red","content":"hi"}"#.to_string()
            ))
        );
    }

    #[test]
    fn test_binary_json_becomes_text() {
        // テスト項目: バイナリフレームの JSON も受け付け、テキストとして転送する
        // given (前提条件):
        let frame = Frame::Binary(br#"{"username":"a","color":"red","content":"hi"}"#.to_vec());

        // when (操作):
        let result = ChatJsonTransform.apply(frame);

        // then (期待する結果):
        assert!(matches!(result, Ok(Frame::Text(_))));
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        // テスト項目: JSON でない入力・必須フィールド欠落は拒否される
        // given (前提条件):
        let not_json = Frame::Text("not-json".to_string());
        let missing_field = Frame::Text(r#"{"username":"a","content":"hi"}"#.to_string());
        let wrong_type = Frame::Text(r#"{"username":1,"color":"red","content":"hi"}"#.to_string());

        // then (期待する結果):
        assert!(matches!(
            ChatJsonTransform.apply(not_json),
            Err(TransformError::MalformedChat(_))
        ));
        assert!(ChatJsonTransform.apply(missing_field).is_err());
        assert!(ChatJsonTransform.apply(wrong_type).is_err());
    }
}
