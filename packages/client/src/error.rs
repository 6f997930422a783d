//! Client error definitions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(e))
    }
}
