//! Order book feed subscriber.

use futures_util::StreamExt;
use hibiki_server::infrastructure::dto::websocket::FeedPayload;
use hibiki_shared::time::get_unix_timestamp_nanos;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{ClientError, endpoint_url};

/// Print every feed payload until the server closes the connection or the
/// user presses Ctrl-C.
pub async fn run_feed(base_url: &str) -> Result<(), ClientError> {
    let url = endpoint_url(base_url, "/orderbookfeed");
    let (ws, _response) = connect_async(url.as_str()).await?;
    tracing::info!("Subscribed to {}", url);

    let (_write, mut read) = ws.split();

    loop {
        tokio::select! {
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    println!("{}", describe(text.as_str(), get_unix_timestamp_nanos()));
                }
                Some(Ok(Message::Close(_))) | None => {
                    println!("Feed closed by server");
                    return Ok(());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            },
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

/// Payload line annotated with its delivery latency
pub fn describe(line: &str, now_nanos: i64) -> String {
    match FeedPayload::parse_line(line) {
        Some(payload) => {
            let latency_ms = (now_nanos - payload.timestamp) as f64 / 1_000_000.0;
            format!("{} (latency {:.3} ms)", line.trim_end(), latency_ms)
        }
        None => line.trim_end().to_string(),
    }
}
