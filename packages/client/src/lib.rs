//! CLI client for the Hibiki broadcast relay.
//!
//! `chat` joins the JSON chat relay and reads lines from the terminal;
//! `feed` subscribes to the order book feed and prints every payload.

pub mod chat;
pub mod error;
pub mod feed;

pub use chat::run_chat;
pub use error::ClientError;
pub use feed::run_feed;

/// Join a base URL such as `ws://127.0.0.1:3000` with an endpoint path.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        // テスト項目: ベース URL の末尾スラッシュの有無に関わらず URL を組み立てられる
        // then (期待する結果):
        assert_eq!(endpoint_url("ws://localhost:3000", "/ws"), "ws://localhost:3000/ws");
        assert_eq!(endpoint_url("ws://localhost:3000/", "/ws"), "ws://localhost:3000/ws");
    }
}
